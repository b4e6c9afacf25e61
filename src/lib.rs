//! GitHub OAuth2 provider adapter.
//!
//! [`Github`] supplies the GitHub-specific parts of an OAuth2 client: endpoint URLs
//! for github.com and Enterprise installs, the default scope, profile and email
//! lookup, and classification of error responses into [`ProviderError`].

pub mod github;
pub mod oauth_core;
pub mod social;

pub use github::{Github, GithubConfig, GithubResourceOwner};
pub use oauth_core::error::{ConfigError, ProviderError};
pub use oauth_core::http_client::{HttpClientError, HttpMethod, HttpRequest, HttpResponse, InMemoryHttpClient, OAuthHttpClient, RedirectPolicy};
#[cfg(feature = "reqwest")]
pub use oauth_core::http_client::ReqwestHttpClient;
pub use oauth_core::provider::OAuth2ProviderAdapter;
pub use oauth_core::types::{AccessToken, ClientCredentials};
pub use social::provider::{ExternalLoginProvider, UserContext};
