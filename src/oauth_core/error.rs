use serde_json::Value;
use thiserror::Error;

/// Errors raised while talking to an identity provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with HTTP status 400 or above.
    #[error("client error {status}: {message}")]
    Client { status: u16, message: String, body: Value },

    /// The provider reported an OAuth error in an otherwise successful response.
    #[error("oauth error {status}: {message}")]
    OAuth { status: u16, message: String, body: Value },

    /// The HTTP client failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// A successful response could not be used.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Builds a client error, preferring the provider's `message` field.
    pub fn client(status: u16, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));
        ProviderError::Client { status, message, body }
    }

    /// Builds an OAuth error from the body's `error` and `error_description` fields.
    pub fn oauth(status: u16, body: Value) -> Self {
        let message = match body.get("error_description").and_then(Value::as_str) {
            Some(description) => description.to_string(),
            None => match body.get("error") {
                Some(Value::String(code)) => code.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            },
        };
        ProviderError::OAuth { status, message, body }
    }

    /// HTTP status of the rejected response, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Client { status, .. } | ProviderError::OAuth { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ProviderError::Client { message, .. } | ProviderError::OAuth { message, .. } => message.clone(),
            ProviderError::Transport(msg) | ProviderError::InvalidResponse(msg) => msg.clone(),
        }
    }

    /// Parsed body of the rejected response.
    pub fn raw_body(&self) -> Option<&Value> {
        match self {
            ProviderError::Client { body, .. } | ProviderError::OAuth { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, ProviderError::Client { .. })
    }

    pub fn is_oauth_error(&self) -> bool {
        matches!(self, ProviderError::OAuth { .. })
    }
}

/// Errors raised while loading provider configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(String),
}
