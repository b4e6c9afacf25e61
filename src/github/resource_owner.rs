use serde::Serialize;
use serde_json::{Map, Value};

/// Authenticated GitHub user.
///
/// Wraps the raw profile fields; `domain` is the deployment the user was fetched from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GithubResourceOwner {
    domain: String,
    raw: Map<String, Value>,
}

impl GithubResourceOwner {
    pub fn new(raw: Map<String, Value>) -> Self {
        GithubResourceOwner { domain: String::new(), raw }
    }

    /// Sets the deployment domain used to build profile URLs.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Numeric user id.
    pub fn id(&self) -> Option<u64> {
        match self.raw.get("id")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Account handle.
    pub fn login(&self) -> Option<&str> {
        self.text("login")
    }

    /// Same as [`Self::login`].
    pub fn nickname(&self) -> Option<&str> {
        self.login()
    }

    /// Display name.
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.text("avatar_url")
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Profile page, `{domain}/{login}`.
    pub fn url(&self) -> Option<String> {
        match self.login() {
            Some(login) if !self.domain.is_empty() => Some(format!("{}/{login}", self.domain)),
            _ => None,
        }
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }
}
