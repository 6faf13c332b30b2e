use std::fmt;

use async_trait::async_trait;

use super::types::{DetailResponse, HistoryResponse, NameSearchResponse, RelationsResponse};

/// Errors that can occur while talking to the trace service.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No token configured. Raised before any request is sent.
    MissingToken,
    /// Client construction or request building failed.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-200 status.
    Api { status: u16, message: String },
    /// The response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingToken => write!(f, "missing API token"),
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "failed to execute request: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API returned non-OK status: {status} - {message}")
            }
            ApiError::Parse(msg) => write!(f, "failed to decode response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The remote person-lookup service.
///
/// Every call is authenticated by the token passed alongside it, so one
/// service instance serves the whole session even if the token is replaced.
#[async_trait]
pub trait TraceService: Send + Sync {
    async fn search_by_name(
        &self,
        token: &str,
        term: &str,
        page: u32,
    ) -> Result<NameSearchResponse, ApiError>;

    async fn lookup_by_id(&self, token: &str, id: i64) -> Result<DetailResponse, ApiError>;

    async fn lookup_by_identity_number(
        &self,
        token: &str,
        number: &str,
    ) -> Result<DetailResponse, ApiError>;

    async fn fetch_relations(
        &self,
        token: &str,
        id: i64,
        offset: u32,
    ) -> Result<RelationsResponse, ApiError>;

    async fn fetch_history(&self, token: &str, page: u32) -> Result<HistoryResponse, ApiError>;
}
