//! Provider-agnostic pieces: HTTP transport, tokens, errors and the adapter interface.

pub mod error;
pub mod http_client;
pub mod provider;
pub mod types;
