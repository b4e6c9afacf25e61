//! Capability interface every provider adapter implements.
//!
//! Required methods are the per-provider specialization points (endpoints, scopes,
//! response classification, owner construction). Provided methods are the generic
//! client flow built on top of them.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use url::form_urlencoded;

use super::error::ProviderError;
use super::http_client::{HttpMethod, HttpRequest, HttpResponse, OAuthHttpClient};
use super::types::{AccessToken, ClientCredentials};

#[async_trait]
pub trait OAuth2ProviderAdapter: Send + Sync {
    /// Identity record produced from a successful details lookup.
    type ResourceOwner: Send;
    /// Transport used for every provider call.
    type Client: OAuthHttpClient;

    fn http_client(&self) -> &Self::Client;

    fn credentials(&self) -> &ClientCredentials;

    /// Base URL of the authorization endpoint.
    fn authorization_url(&self) -> String;

    /// Base URL of the token endpoint. `params` are the token request parameters.
    fn access_token_url(&self, params: &HashMap<String, String>) -> String;

    /// URL of the authenticated user's profile.
    fn resource_owner_details_url(&self, token: &AccessToken) -> String;

    /// Minimum scopes requested when the caller asks for none.
    fn default_scopes(&self) -> Vec<String>;

    /// Classifies a response before any domain object is built from it.
    fn check_response(&self, response: &HttpResponse, data: &Value) -> Result<(), ProviderError>;

    fn create_resource_owner(&self, data: Map<String, Value>, token: &AccessToken) -> Self::ResourceOwner;

    fn scope_separator(&self) -> &str {
        ","
    }

    /// Full URL to send the user to. `state` is produced and verified by the caller.
    fn authorization_redirect(&self, state: &str, scopes: Option<&[String]>) -> String {
        let scopes = scopes.map_or_else(|| self.default_scopes(), <[String]>::to_vec);
        let credentials = self.credentials();
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("client_id", &credentials.client_id);
        if let Some(redirect_uri) = &credentials.redirect_uri {
            query.append_pair("redirect_uri", redirect_uri);
        }
        query.append_pair("response_type", "code");
        query.append_pair("scope", &scopes.join(self.scope_separator()));
        query.append_pair("state", state);

        let base = self.authorization_url();
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{base}{separator}{}", query.finish())
    }

    /// Request signed with the token as a bearer credential.
    fn authenticated_request(&self, method: HttpMethod, url: &str, token: &AccessToken) -> HttpRequest {
        HttpRequest::new(method, url)
            .with_header("Authorization", format!("Bearer {}", token.access_token))
            .with_header("Accept", "application/json")
    }

    /// Executes `request`, parses the body and runs [`Self::check_response`] on it.
    #[instrument(skip_all, fields(method = %request.method, url = %request.url), level = "debug")]
    async fn parsed_response(&self, request: HttpRequest) -> Result<Value, ProviderError> {
        let response = self
            .http_client()
            .execute(request)
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let parsed = parse_body(&response);
        let data = parsed
            .clone()
            .unwrap_or_else(|| Value::String(String::from_utf8_lossy(&response.body).into_owned()));

        if let Err(err) = self.check_response(&response, &data) {
            let error_kind = if err.is_client_error() { "client" } else { "oauth" };
            warn!(status = response.status, error_kind, message = %err.message(), "provider rejected response");
            return Err(err);
        }
        debug!(status = response.status, "provider response accepted");
        parsed.ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "unparseable body with content type {:?}",
                response.content_type()
            ))
        })
    }

    /// Authenticated GET of the details URL; the body must be a JSON object.
    #[instrument(skip_all, level = "debug")]
    async fn fetch_details_object(&self, token: &AccessToken) -> Result<Map<String, Value>, ProviderError> {
        let url = self.resource_owner_details_url(token);
        let request = self.authenticated_request(HttpMethod::GET, &url, token);
        match self.parsed_response(request).await? {
            Value::Object(details) => Ok(details),
            other => Err(ProviderError::InvalidResponse(format!(
                "resource owner details are not an object: {other}"
            ))),
        }
    }

    /// Raw profile fields of the token's owner. Providers override this to enrich
    /// the fields returned by [`Self::fetch_details_object`].
    async fn fetch_resource_owner_details(&self, token: &AccessToken) -> Result<Map<String, Value>, ProviderError> {
        self.fetch_details_object(token).await
    }

    async fn resource_owner(&self, token: &AccessToken) -> Result<Self::ResourceOwner, ProviderError> {
        let details = self.fetch_resource_owner_details(token).await?;
        Ok(self.create_resource_owner(details, token))
    }

    /// Exchanges an authorization code for an access token.
    #[instrument(skip_all, level = "debug")]
    async fn access_token(&self, code: &str) -> Result<AccessToken, ProviderError> {
        let credentials = self.credentials();
        let mut form = vec![
            ("client_id", credentials.client_id.clone()),
            ("client_secret", credentials.client_secret.clone()),
            ("code", code.to_string()),
            ("grant_type", "authorization_code".to_string()),
        ];
        if let Some(redirect_uri) = &credentials.redirect_uri {
            form.push(("redirect_uri", redirect_uri.clone()));
        }
        let params: HashMap<String, String> = form.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
            .into_bytes();

        let request = HttpRequest::new(HttpMethod::POST, self.access_token_url(&params))
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_header("Accept", "application/json")
            .with_body(body);
        let data = self.parsed_response(request).await?;
        AccessToken::from_response(&data)
    }
}

/// Decodes a response body as JSON, or as a form when the content type says so.
///
/// Returns `None` when the body is neither.
pub fn parse_body(response: &HttpResponse) -> Option<Value> {
    if response.content_type().as_deref() == Some("application/x-www-form-urlencoded") {
        let fields = form_urlencoded::parse(&response.body)
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect::<Map<_, _>>();
        return Some(Value::Object(fields));
    }
    serde_json::from_slice(&response.body).ok()
}
