use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::config::GithubConfig;
use super::emails::select_primary_email;
use super::resource_owner::GithubResourceOwner;
use crate::oauth_core::error::ProviderError;
use crate::oauth_core::http_client::{HttpMethod, HttpResponse, OAuthHttpClient};
use crate::oauth_core::provider::OAuth2ProviderAdapter;
use crate::oauth_core::types::{AccessToken, ClientCredentials};

/// Scope needed to read the user's identity and email addresses.
pub const DEFAULT_SCOPE: &str = "user.email";

/// OAuth2 adapter for github.com and GitHub Enterprise Server.
///
/// Configuration is fixed at construction; build a second adapter to target
/// another deployment.
#[derive(Debug, Clone)]
pub struct Github<C: OAuthHttpClient> {
    config: GithubConfig,
    credentials: ClientCredentials,
    http: C,
}

impl<C: OAuthHttpClient> Github<C> {
    /// Adapter for public github.com.
    pub fn new(credentials: ClientCredentials, http: C) -> Self {
        Self::with_config(GithubConfig::default(), credentials, http)
    }

    pub fn with_config(config: GithubConfig, credentials: ClientCredentials, http: C) -> Self {
        Github { config, credentials, http }
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }
}

#[async_trait]
impl<C: OAuthHttpClient> OAuth2ProviderAdapter for Github<C> {
    type ResourceOwner = GithubResourceOwner;
    type Client = C;

    fn http_client(&self) -> &C {
        &self.http
    }

    fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    fn authorization_url(&self) -> String {
        format!("{}/login/oauth/authorize", self.config.domain())
    }

    fn access_token_url(&self, _params: &HashMap<String, String>) -> String {
        format!("{}/login/oauth/access_token", self.config.domain())
    }

    fn resource_owner_details_url(&self, _token: &AccessToken) -> String {
        if self.config.is_public() {
            format!("{}/user", self.config.api_domain())
        } else {
            format!("{}/api/v3/user", self.config.domain())
        }
    }

    fn default_scopes(&self) -> Vec<String> {
        vec![DEFAULT_SCOPE.to_string()]
    }

    /// See <https://docs.github.com/en/rest/overview/resources-in-the-rest-api#client-errors>.
    fn check_response(&self, response: &HttpResponse, data: &Value) -> Result<(), ProviderError> {
        if response.status >= 400 {
            Err(ProviderError::client(response.status, data.clone()))
        } else if data.get("error").is_some_and(|error| !error.is_null()) {
            Err(ProviderError::oauth(response.status, data.clone()))
        } else {
            Ok(())
        }
    }

    fn create_resource_owner(&self, data: Map<String, Value>, _token: &AccessToken) -> GithubResourceOwner {
        GithubResourceOwner::new(data).with_domain(self.config.domain())
    }

    /// Profile fields, with `email` filled from `/emails` when the profile hides it.
    #[instrument(skip_all, level = "debug")]
    async fn fetch_resource_owner_details(&self, token: &AccessToken) -> Result<Map<String, Value>, ProviderError> {
        let mut details = self.fetch_details_object(token).await?;

        let has_email = details
            .get("email")
            .and_then(Value::as_str)
            .is_some_and(|email| !email.is_empty());
        if !has_email {
            debug!("profile has no public email, querying email list");
            let url = format!("{}/emails", self.resource_owner_details_url(token));
            let request = self.authenticated_request(HttpMethod::GET, &url, token);
            let emails = self.parsed_response(request).await?;
            let email = select_primary_email(&emails);
            debug!(found = email.is_some(), "email list inspected");
            details.insert("email".to_string(), email.map_or(Value::Null, Value::String));
        }

        Ok(details)
    }
}
