//! Stateless request builder and response parser for the Rana API.
//!
//! # Design
//! `RanaClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Every operation is split into a `build_*` method that
//! produces an `HttpRequest` and `parse_response`, which consumes an
//! `HttpResponse`. The async methods (`request`, `summaries`,
//! `current_user`) glue the two together around a `Transport`; concurrent
//! calls on one client share nothing but the immutable configuration.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::dates::{self, SummaryRange};
use crate::error::{ApiError, Error, ErrorDetail};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::Query;
use crate::transport::Transport;

pub const SUMMARIES_PATH: &str = "/api/v1/users/current/summaries";
pub const CURRENT_USER_PATH: &str = "/api/v1/users/current";

#[derive(Debug, Clone)]
pub struct RanaClient {
    config: ClientConfig,
}

impl RanaClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET {endpoint}{path}{query}` with the Basic `Authorization` header.
    ///
    /// `path` is appended verbatim; it is not checked for a leading `/`.
    pub fn build_request(&self, path: &str, query: &Query) -> HttpRequest {
        let url = format!(
            "{}{}{}",
            self.config.endpoint(),
            path,
            query.to_suffix(self.config.query_encoding())
        );
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![(
                "Authorization".to_string(),
                self.config.credential().authorization_value(),
            )],
        }
    }

    /// Summaries from `days_back` days before today through today.
    pub fn build_summaries(&self, days_back: u64) -> HttpRequest {
        self.build_summaries_on(days_back, dates::today())
    }

    pub fn build_summaries_on(&self, days_back: u64, today: NaiveDate) -> HttpRequest {
        let range = SummaryRange::days_back(days_back, today);
        let query = Query::new()
            .with("start", range.start_param())
            .with("end", range.end_param());
        self.build_request(SUMMARIES_PATH, &query)
    }

    pub fn build_current_user(&self) -> HttpRequest {
        self.build_request(CURRENT_USER_PATH, &Query::new())
    }

    /// JSON body on 2xx; otherwise `ApiError::Http` with whatever the body
    /// says about the failure.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if response.is_success() {
            return serde_json::from_str(&response.body)
                .map_err(|e| ApiError::Deserialization(e.to_string()));
        }

        let err = ApiError::Http {
            status: response.status,
            detail: error_detail(&response.body),
        };
        warn!(status = response.status, "{err}");
        Err(err)
    }

    pub async fn request<T>(&self, transport: &T, path: &str, query: &Query) -> Result<Value, Error>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_request(path, query);
        self.send(transport, request).await
    }

    pub async fn summaries<T>(&self, transport: &T, days_back: u64) -> Result<Value, Error>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_summaries(days_back);
        self.send(transport, request).await
    }

    pub async fn current_user<T>(&self, transport: &T) -> Result<Value, Error>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_current_user();
        self.send(transport, request).await
    }

    async fn send<T>(&self, transport: &T, request: HttpRequest) -> Result<Value, Error>
    where
        T: Transport + ?Sized,
    {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = transport.execute(request).await?;
        Ok(self.parse_response(response)?)
    }
}

/// Extract the server's `error` field from a failed response body.
///
/// A JSON body without a truthy `error` yields `Missing`, matching what
/// older clients printed (no suffix at all). A bare `null` body counts as
/// unparseable: older clients failed reading `.error` off it.
fn error_detail(body: &str) -> ErrorDetail {
    let payload: Value = match serde_json::from_str(body) {
        Ok(Value::Null) | Err(_) => return ErrorDetail::Unparseable,
        Ok(payload) => payload,
    };
    match payload.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => ErrorDetail::Missing,
        Some(Value::String(s)) if s.is_empty() => ErrorDetail::Missing,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => ErrorDetail::Missing,
        Some(Value::String(s)) => ErrorDetail::Server(s.clone()),
        // Arrays and objects render as JSON text, not JS `toString` output.
        Some(other) => ErrorDetail::Server(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::decode_authorization;
    use crate::query::QueryEncoding;
    use crate::transport::TransportError;
    use serde_json::json;

    fn client() -> RanaClient {
        RanaClient::new(ClientConfig::new("test-key").with_endpoint("http://localhost:8000"))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn build_request_without_query() {
        let req = client().build_request("/api/v1/users/current", &Query::new());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/api/v1/users/current");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("Authorization"), Some("Basic dGVzdC1rZXk="));
    }

    #[test]
    fn build_request_with_query() {
        let query = Query::from([("a", "1"), ("b", "2")]);
        let req = client().build_request("/x", &query);
        assert_eq!(req.url, "http://localhost:8000/x?a=1&b=2");
    }

    #[test]
    fn build_request_appends_path_verbatim() {
        let req = client().build_request("no-slash", &Query::new());
        assert_eq!(req.url, "http://localhost:8000no-slash");
    }

    #[test]
    fn endpoint_slash_is_not_collapsed() {
        let client = RanaClient::new(ClientConfig::new("k").with_endpoint("http://x/"));
        let req = client.build_request("/a", &Query::new());
        assert_eq!(req.url, "http://x//a");
    }

    #[test]
    fn authorization_round_trips() {
        let req = client().build_request("/", &Query::new());
        let key = decode_authorization(req.header("Authorization").unwrap()).unwrap();
        assert_eq!(key, "test-key");
    }

    #[test]
    fn percent_encoding_is_opt_in() {
        let config = ClientConfig::new("k")
            .with_endpoint("http://x")
            .with_query_encoding(QueryEncoding::Percent);
        let req = RanaClient::new(config).build_request("/p", &Query::from([("q", "a b")]));
        assert_eq!(req.url, "http://x/p?q=a%20b");
    }

    #[test]
    fn build_summaries_uses_date_range() {
        let req = client().build_summaries_on(7, date(2024, 3, 5));
        assert_eq!(
            req.url,
            "http://localhost:8000/api/v1/users/current/summaries?start=2024-02-27&end=2024-03-05"
        );
    }

    #[test]
    fn build_summaries_ends_today() {
        let today = dates::format_date(dates::today());
        let req = client().build_summaries(7);
        assert!(req.url.ends_with(&format!("&end={today}")), "{}", req.url);
    }

    #[test]
    fn build_current_user() {
        let req = client().build_current_user();
        assert_eq!(req.url, "http://localhost:8000/api/v1/users/current");
    }

    #[test]
    fn parse_success_returns_json() {
        let value = client()
            .parse_response(HttpResponse::new(200, r#"{"a":1}"#))
            .unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn parse_success_with_bad_json() {
        let err = client()
            .parse_response(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_error_with_error_field() {
        let err = client()
            .parse_response(HttpResponse::new(404, r#"{"error":"not found"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404 (not found)");
    }

    #[test]
    fn parse_error_with_non_json_body() {
        let err = client()
            .parse_response(HttpResponse::new(500, "<html>oops</html>"))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500 (No error field.)");
    }

    #[test]
    fn parse_error_with_empty_body() {
        let err = client()
            .parse_response(HttpResponse::new(502, ""))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502 (No error field.)");
    }

    #[test]
    fn parse_error_json_without_error_field() {
        let err = client()
            .parse_response(HttpResponse::new(400, r#"{"message":"nope"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 400");
    }

    #[test]
    fn parse_error_with_non_string_error_field() {
        let err = client()
            .parse_response(HttpResponse::new(409, r#"{"error":{"code":7}}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"HTTP 409 ({"code":7})"#);
    }

    #[test]
    fn parse_error_with_null_body() {
        let err = client()
            .parse_response(HttpResponse::new(500, "null"))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500 (No error field.)");
    }

    #[test]
    fn falsy_error_fields_are_missing() {
        for body in [r#"{"error":null}"#, r#"{"error":""}"#, r#"{"error":false}"#, r#"{"error":0}"#, "[]"] {
            assert_eq!(error_detail(body), ErrorDetail::Missing, "{body}");
        }
    }

    /// Answers every request with a fixed status and body.
    struct Canned(u16, &'static str);

    #[async_trait::async_trait]
    impl Transport for Canned {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(self.0, self.1))
        }
    }

    struct Refused;

    #[async_trait::async_trait]
    impl Transport for Refused {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }
    }

    #[tokio::test]
    async fn request_resolves_with_json() {
        let value = client()
            .request(&Canned(200, r#"{"a":1}"#), "/x", &Query::new())
            .await
            .unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[tokio::test]
    async fn request_fails_with_server_message() {
        let err = client()
            .request(&Canned(404, r#"{"error":"not found"}"#), "/x", &Query::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404 (not found)");
    }

    #[tokio::test]
    async fn request_passes_transport_error_through() {
        let err = client()
            .request(&Refused, "/x", &Query::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn concurrent_requests_keep_their_own_results() {
        let ok = Canned(200, r#"{"ok":true}"#);
        let bad = Canned(500, "boom");
        let c = client();
        let query = Query::new();
        let (a, b) = tokio::join!(
            c.request(&ok, "/a", &query),
            c.request(&bad, "/b", &query),
        );
        assert_eq!(a.unwrap(), json!({"ok": true}));
        assert_eq!(b.unwrap_err().to_string(), "HTTP 500 (No error field.)");
    }

    #[test]
    fn redirect_status_is_an_error() {
        let err = client()
            .parse_response(HttpResponse::new(304, ""))
            .unwrap_err();
        assert_eq!(err.status(), Some(304));
    }
}
