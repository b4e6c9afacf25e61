use std::env;

/// Public GitHub web domain.
pub const DEFAULT_DOMAIN: &str = "https://github.com";
/// Public GitHub REST API domain.
pub const DEFAULT_API_DOMAIN: &str = "https://api.github.com";

/// Endpoint configuration for a GitHub deployment.
///
/// `api_domain` is only consulted for the public deployment. Enterprise installs
/// serve their API under `{domain}/api/v3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    domain: String,
    api_domain: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            domain: DEFAULT_DOMAIN.to_string(),
            api_domain: DEFAULT_API_DOMAIN.to_string(),
        }
    }
}

impl GithubConfig {
    pub fn builder() -> GithubConfigBuilder {
        GithubConfigBuilder::default()
    }

    /// Configuration for a GitHub Enterprise Server install at `domain`.
    pub fn enterprise(domain: impl Into<String>) -> Self {
        Self::builder().domain(domain).build()
    }

    /// Reads `GITHUB_DOMAIN` and `GITHUB_API_DOMAIN`, falling back to the public defaults.
    pub fn from_env() -> Self {
        let mut builder = Self::builder();
        if let Ok(domain) = env::var("GITHUB_DOMAIN").map(|v| v.trim().to_string()) {
            if !domain.is_empty() {
                builder = builder.domain(domain);
            }
        }
        if let Ok(api_domain) = env::var("GITHUB_API_DOMAIN").map(|v| v.trim().to_string()) {
            if !api_domain.is_empty() {
                builder = builder.api_domain(api_domain);
            }
        }
        builder.build()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    /// True for github.com, false for self-hosted installs.
    pub fn is_public(&self) -> bool {
        self.domain == DEFAULT_DOMAIN
    }
}

/// Builder for [`GithubConfig`].
#[derive(Debug, Default)]
pub struct GithubConfigBuilder {
    domain: Option<String>,
    api_domain: Option<String>,
}

impl GithubConfigBuilder {
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn api_domain(mut self, api_domain: impl Into<String>) -> Self {
        self.api_domain = Some(api_domain.into());
        self
    }

    pub fn build(self) -> GithubConfig {
        let trim = |s: String| s.trim_end_matches('/').to_string();
        GithubConfig {
            domain: self.domain.map_or_else(|| DEFAULT_DOMAIN.to_string(), trim),
            api_domain: self.api_domain.map_or_else(|| DEFAULT_API_DOMAIN.to_string(), trim),
        }
    }
}
