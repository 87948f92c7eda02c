//! Immutable client configuration.

use std::env;

use thiserror::Error;

use crate::auth::Credential;
use crate::query::QueryEncoding;

/// Endpoint used when neither the caller nor `RANA_ENDPOINT` supplies one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

pub const KEY_ENV: &str = "RANA_KEY";
pub const ENDPOINT_ENV: &str = "RANA_ENDPOINT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key: set {KEY_ENV} or pass one explicitly")]
    MissingKey,
}

/// Credential, endpoint and query encoding for one `RanaClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    credential: Credential,
    endpoint: String,
    query_encoding: QueryEncoding,
}

impl ClientConfig {
    /// Uses `RANA_ENDPOINT` if set, else [`DEFAULT_ENDPOINT`].
    pub fn new(key: impl Into<String>) -> Self {
        let endpoint = env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self {
            credential: Credential::new(key),
            endpoint,
            query_encoding: QueryEncoding::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let key = env::var(KEY_ENV).map_err(|_| ConfigError::MissingKey)?;
        Ok(Self::new(key))
    }

    /// Used verbatim: request paths are appended to it as-is.
    pub fn with_endpoint(self, endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ..self
        }
    }

    pub fn with_query_encoding(self, query_encoding: QueryEncoding) -> Self {
        Self {
            query_encoding,
            ..self
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn query_encoding(&self) -> QueryEncoding {
        self.query_encoding
    }
}
