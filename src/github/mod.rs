//! GitHub and GitHub Enterprise Server adapter.

pub mod config;
pub mod emails;
pub mod provider;
pub mod resource_owner;

pub use config::{GithubConfig, GithubConfigBuilder};
pub use emails::{EmailRecord, select_primary_email};
pub use provider::{DEFAULT_SCOPE, Github};
pub use resource_owner::GithubResourceOwner;
