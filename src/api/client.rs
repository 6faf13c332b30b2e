//! HTTP implementation of [`TraceService`].
//!
//! Every endpoint is a JSON `POST` authenticated with the `X-API-Token`
//! header. Non-200 responses are turned into [`ApiError::Api`] carrying the
//! raw body so the operator sees what the server said.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::service::{ApiError, TraceService};
use super::types::{
    DetailResponse, HistoryRequest, HistoryResponse, IdLookupRequest, IdentityNumberRequest,
    NameSearchRequest, NameSearchResponse, RelationsRequest, RelationsResponse,
};

pub const TOKEN_HEADER: &str = "X-API-Token";

pub struct HttpTraceService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTraceService {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, token: &str, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        if token.is_empty() {
            return Err(ApiError::MissingToken);
        }

        let url = format!("{}{}", self.base_url, endpoint);
        info!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(TOKEN_HEADER, token)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("{} responded with {}", endpoint, status);

        if status != reqwest::StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            warn!("Trace service error: {} - {}", status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TraceService for HttpTraceService {
    async fn search_by_name(
        &self,
        token: &str,
        term: &str,
        page: u32,
    ) -> Result<NameSearchResponse, ApiError> {
        self.post(token, "/trace/name", &NameSearchRequest { name: term, page })
            .await
    }

    async fn lookup_by_id(&self, token: &str, id: i64) -> Result<DetailResponse, ApiError> {
        self.post(token, "/trace/id", &IdLookupRequest { id }).await
    }

    async fn lookup_by_identity_number(
        &self,
        token: &str,
        number: &str,
    ) -> Result<DetailResponse, ApiError> {
        self.post(token, "/trace/nric", &IdentityNumberRequest { nric: number })
            .await
    }

    async fn fetch_relations(
        &self,
        token: &str,
        id: i64,
        offset: u32,
    ) -> Result<RelationsResponse, ApiError> {
        self.post(token, "/trace/relations", &RelationsRequest { id, offset })
            .await
    }

    async fn fetch_history(&self, token: &str, page: u32) -> Result<HistoryResponse, ApiError> {
        self.post(token, "/history", &HistoryRequest { page }).await
    }
}
