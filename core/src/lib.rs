//! Client core for the Rana time-tracking API.
//!
//! # Overview
//! Builds authenticated `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). The async
//! helpers on `RanaClient` run a request through any `Transport`;
//! `ReqwestTransport` is the stock one.
//!
//! # Design
//! - `RanaClient` is stateless: it holds only an immutable `ClientConfig`.
//! - Authentication is HTTP Basic over the bare API key.
//! - Non-2xx responses become `ApiError::Http`, displayed as
//!   `HTTP <status> (<server error>)`.
//! - Transport failures are forwarded unchanged in `Error::Transport`.

pub mod auth;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;

pub use auth::{decode_authorization, Credential};
pub use client::{RanaClient, CURRENT_USER_PATH, SUMMARIES_PATH};
pub use config::{ClientConfig, ConfigError};
pub use dates::{format_date, SummaryRange};
pub use error::{ApiError, Error, ErrorDetail};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{Query, QueryEncoding};
pub use transport::{ReqwestTransport, Transport, TransportError};
