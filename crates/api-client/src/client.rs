//! HTTP client for the Stockdesk backend API.
//!
//! One `reqwest::Client` with a cookie store carries the session; every
//! capability trait from `stockdesk-core::api` is implemented on the same
//! client. Requests and responses are flat JSON objects. Error bodies
//! expose a human-readable `detail` field which is preserved verbatim.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use stockdesk_core::api::{
    AuthApi, ChatApi, GoalsApi, StocksApi, TransactionsApi, WatchlistApi,
};
use stockdesk_core::chat::{AnalysisRequest, ChatReply, ChatRequest};
use stockdesk_core::errors::{ApiError, Error, Result};
use stockdesk_core::goals::Goal;
use stockdesk_core::portfolio::{PerformanceMetrics, PortfolioSnapshot, SectorWeight};
use stockdesk_core::quotes::{
    Candle, MarketOverview, OptionsChain, Quote, SymbolSearchResult, Timeframe,
};
use stockdesk_core::session::{Credentials, UserProfile};
use stockdesk_core::trades::{EquityOrder, OptionOrder};
use stockdesk_core::transactions::Transaction;

/// Default base URL for a local backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types (internal, for request/response envelopes)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct SessionResponse {
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileFieldUpdate<'a> {
    field: &'a str,
    value: &'a str,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PictureUpdate<'a> {
    url: &'a str,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct WatchlistMutation<'a> {
    symbol: &'a str,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalsPayload<'a> {
    goals: &'a [Goal],
}

/// Maps a non-2xx response body to a backend error, carrying the
/// `detail` text verbatim when present.
fn backend_error(status: StatusCode, body: &str) -> ApiError {
    if let Ok(err) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(detail) = err.detail {
            return ApiError::Backend {
                status: status.as_u16(),
                detail,
            };
        }
    }
    ApiError::Backend {
        status: status.as_u16(),
        detail: format!(
            "HTTP {}: {}",
            status.as_u16(),
            body.chars().take(200).collect::<String>()
        ),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the Stockdesk backend.
///
/// # Example
///
/// ```ignore
/// let client = BackendClient::new("http://localhost:8000", None)?;
/// let quote = client.quote("AAPL").await?;
/// ```
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend base URL (e.g., "http://localhost:8000")
    /// * `timeout` - Optional request timeout; by default calls wait
    ///   indefinitely and the owning view stays in its loading state
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request and parse the response.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("[Backend] GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        self.parse_response(response).await
    }

    /// Make a POST request with a JSON body and parse the response.
    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!("[Backend] POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        self.parse_response(response).await
    }

    /// Make a PUT request with a JSON body and parse the response.
    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!("[Backend] PUT {}", url);

        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        self.parse_response(response).await
    }

    /// Make a request that carries no response body worth parsing.
    async fn send_expect_ok(&self, request: reqwest::RequestBuilder, url: &str) -> Result<()> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        debug!("[Backend] {} failed with {}", url, status);
        Err(backend_error(status, &body).into())
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(backend_error(status, &body).into());
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("{} (body: {:.200})", e, body)).into())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trait Implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl AuthApi for BackendClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserProfile> {
        self.post("/api/auth/login", credentials).await
    }

    async fn sign_out(&self) -> Result<()> {
        let url = self.url("/api/auth/logout");
        debug!("[Backend] POST {}", url);
        self.send_expect_ok(self.client.post(&url), &url).await
    }

    async fn check_session(&self) -> Result<Option<UserProfile>> {
        let response: SessionResponse = self.get("/api/auth/session").await?;
        Ok(response.user)
    }

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.get(&format!("/api/users/{}", urlencoding::encode(user_id)))
            .await
    }

    async fn update_profile_field(
        &self,
        user_id: &str,
        field: &str,
        value: &str,
    ) -> Result<UserProfile> {
        self.put(
            &format!("/api/users/{}/profile", urlencoding::encode(user_id)),
            &ProfileFieldUpdate { field, value },
        )
        .await
    }

    async fn update_profile_picture(&self, user_id: &str, url: &str) -> Result<UserProfile> {
        self.put(
            &format!(
                "/api/users/{}/profile-picture",
                urlencoding::encode(user_id)
            ),
            &PictureUpdate { url },
        )
        .await
    }

    async fn browse_profiles(&self) -> Result<Vec<UserProfile>> {
        self.get("/api/users").await
    }
}

#[async_trait]
impl StocksApi for BackendClient {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        self.get(&format!(
            "/api/stocks/{}/quote",
            urlencoding::encode(symbol)
        ))
        .await
    }

    async fn historical_prices(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        self.get(&format!(
            "/api/stocks/{}/history?timeframe={}",
            urlencoding::encode(symbol),
            timeframe
        ))
        .await
    }

    async fn options_chain(&self, symbol: &str) -> Result<OptionsChain> {
        self.get(&format!(
            "/api/stocks/{}/options",
            urlencoding::encode(symbol)
        ))
        .await
    }

    async fn execute_equity_trade(
        &self,
        user_id: &str,
        order: &EquityOrder,
    ) -> Result<PortfolioSnapshot> {
        self.post(
            &format!("/api/users/{}/trades/equity", urlencoding::encode(user_id)),
            order,
        )
        .await
    }

    async fn execute_option_trade(
        &self,
        user_id: &str,
        order: &OptionOrder,
    ) -> Result<PortfolioSnapshot> {
        self.post(
            &format!("/api/users/{}/trades/option", urlencoding::encode(user_id)),
            order,
        )
        .await
    }

    async fn portfolio(&self, user_id: &str) -> Result<PortfolioSnapshot> {
        self.get(&format!(
            "/api/users/{}/portfolio",
            urlencoding::encode(user_id)
        ))
        .await
    }

    async fn performance_metrics(&self, user_id: &str) -> Result<PerformanceMetrics> {
        self.get(&format!(
            "/api/users/{}/performance",
            urlencoding::encode(user_id)
        ))
        .await
    }

    async fn sector_allocation(&self, user_id: &str) -> Result<Vec<SectorWeight>> {
        self.get(&format!(
            "/api/users/{}/allocation",
            urlencoding::encode(user_id)
        ))
        .await
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolSearchResult>> {
        self.get(&format!(
            "/api/stocks/search?q={}",
            urlencoding::encode(query)
        ))
        .await
    }

    async fn market_overview(&self) -> Result<MarketOverview> {
        self.get("/api/market/overview").await
    }
}

#[async_trait]
impl WatchlistApi for BackendClient {
    async fn list(&self, user_id: &str) -> Result<Vec<String>> {
        self.get(&format!(
            "/api/users/{}/watchlist",
            urlencoding::encode(user_id)
        ))
        .await
    }

    async fn add(&self, user_id: &str, symbol: &str) -> Result<()> {
        let url = self.url(&format!(
            "/api/users/{}/watchlist",
            urlencoding::encode(user_id)
        ));
        debug!("[Backend] POST {}", url);
        self.send_expect_ok(
            self.client.post(&url).json(&WatchlistMutation { symbol }),
            &url,
        )
        .await
    }

    async fn remove(&self, user_id: &str, symbol: &str) -> Result<()> {
        let url = self.url(&format!(
            "/api/users/{}/watchlist/{}",
            urlencoding::encode(user_id),
            urlencoding::encode(symbol)
        ));
        debug!("[Backend] DELETE {}", url);
        self.send_expect_ok(self.client.delete(&url), &url).await
    }
}

#[async_trait]
impl GoalsApi for BackendClient {
    async fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.get(&format!(
            "/api/users/{}/goals",
            urlencoding::encode(user_id)
        ))
        .await
    }

    async fn replace(&self, user_id: &str, goals: &[Goal]) -> Result<Vec<Goal>> {
        self.put(
            &format!("/api/users/{}/goals", urlencoding::encode(user_id)),
            &GoalsPayload { goals },
        )
        .await
    }
}

#[async_trait]
impl TransactionsApi for BackendClient {
    async fn list(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.get(&format!(
            "/api/users/{}/transactions",
            urlencoding::encode(user_id)
        ))
        .await
    }
}

#[async_trait]
impl ChatApi for BackendClient {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.post("/api/chat/message", request).await
    }

    async fn request_analysis(&self, request: &AnalysisRequest) -> Result<ChatReply> {
        request.validate()?;
        self.post("/api/chat/analysis", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new(DEFAULT_API_BASE_URL, None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_url_normalization() {
        let client = BackendClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(
            client.url("/api/market/overview"),
            "http://localhost:8000/api/market/overview"
        );
    }

    #[test]
    fn backend_detail_survives_verbatim() {
        let err = backend_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "Strike price is required for option trades"}"#,
        );
        match err {
            ApiError::Backend { status, detail } => {
                assert_eq!(status, 422);
                assert_eq!(detail, "Strike price is required for option trades");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn non_json_error_bodies_fall_back_to_status_line() {
        let err = backend_error(StatusCode::BAD_GATEWAY, "<html>upstream died</html>");
        match err {
            ApiError::Backend { status, detail } => {
                assert_eq!(status, 502);
                assert!(detail.starts_with("HTTP 502"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(5000);
        let err = backend_error(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ApiError::Backend { detail, .. } => {
                assert!(detail.len() < 300);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn symbols_are_percent_encoded_in_paths() {
        assert_eq!(urlencoding::encode("BRK.B/old"), "BRK.B%2Fold");
    }
}
