use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entry of the `/user/emails` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: bool,
}

/// Picks the address to expose from an `/user/emails` body.
///
/// Only the first entry is considered, and only if it is both primary and verified.
/// GitHub lists the primary address first; a primary entry further down is ignored.
pub fn select_primary_email(records: &Value) -> Option<String> {
    let first = records.as_array()?.first()?;
    let record: EmailRecord = serde_json::from_value(first.clone()).ok()?;
    (record.primary && record.verified).then_some(record.email)
}
