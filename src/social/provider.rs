use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::github::Github;
use crate::oauth_core::error::ProviderError;
use crate::oauth_core::http_client::OAuthHttpClient;
use crate::oauth_core::provider::OAuth2ProviderAdapter;

/// Identity handed to the application after an upstream login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Stable upstream identifier.
    pub subject: String,
    pub login: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Implement this to support "Login via X" (GitHub, another OAuth2 server…)
#[async_trait]
pub trait ExternalLoginProvider: Send + Sync + 'static {
    /// e.g. "github", "my-oauth2-server"
    fn scheme(&self) -> &str;

    /// Build the redirect URL to the upstream /authorize endpoint
    fn auth_redirect(&self, state: &str) -> String;

    /// After callback: exchange code → token → profile → UserContext.
    /// `state` has already been verified by the caller.
    async fn handle_callback(&self, code: &str, state: &str) -> Result<UserContext, ProviderError>;
}

#[async_trait]
impl<C: OAuthHttpClient> ExternalLoginProvider for Github<C> {
    fn scheme(&self) -> &str {
        "github"
    }

    fn auth_redirect(&self, state: &str) -> String {
        self.authorization_redirect(state, None)
    }

    #[instrument(skip_all, level = "debug")]
    async fn handle_callback(&self, code: &str, _state: &str) -> Result<UserContext, ProviderError> {
        let token = self.access_token(code).await?;
        let owner = self.resource_owner(&token).await?;
        let subject = owner
            .id()
            .map(|id| id.to_string())
            .ok_or_else(|| ProviderError::InvalidResponse("user profile has no id".into()))?;
        Ok(UserContext {
            subject,
            login: owner.login().map(str::to_string),
            email: owner.email().map(str::to_string),
            name: owner.name().map(str::to_string),
            picture: owner.avatar_url().map(str::to_string),
        })
    }
}
