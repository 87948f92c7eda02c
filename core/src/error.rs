//! Error types for the Rana API client.
//!
//! # Design
//! `ApiError` covers everything the client decides on its own: a non-2xx
//! status, or a success body that is not JSON. Transport failures are not
//! classified here; `Error::Transport` forwards them untouched.

use std::fmt;

use thiserror::Error;

use crate::transport::TransportError;

/// What the server said about a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    /// The body was a JSON object with an `error` field.
    Server(String),
    /// The body was JSON but carried no usable `error` field.
    Missing,
    /// The body was empty or not JSON at all.
    Unparseable,
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetail::Server(message) => write!(f, " ({message})"),
            ErrorDetail::Missing => Ok(()),
            ErrorDetail::Unparseable => write!(f, " (No error field.)"),
        }
    }
}

/// Errors returned by `RanaClient::parse_response`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{detail}")]
    Http { status: u16, detail: ErrorDetail },

    /// A 2xx response whose body could not be parsed as JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Deserialization(_) => None,
        }
    }
}

/// Errors returned by the async request operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
