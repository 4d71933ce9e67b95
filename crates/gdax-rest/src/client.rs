//! Main REST client implementation
//!
//! Every call funnels through one request path: generate the
//! timestamp, build the canonical request path, sign, attach headers, send,
//! then decode the success or error body. The signed body bytes are the
//! transmitted body bytes.

use crate::endpoints::{AccountEndpoints, MarketEndpoints};
use crate::error::{RestError, RestResult};
use crate::types::{
    AggregatedLevel, Candle, Currency, Granularity, OrderBook, OrderLevel, Product, ProductStats,
    ProductTicker, ReportStatus, ServerTime, Trade, TrailingVolume,
};
use chrono::{DateTime, Utc};
use gdax_auth::Credentials;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Production REST endpoint
pub const PRODUCTION_URL: &str = "https://api.gdax.com";
/// Sandbox REST endpoint
pub const SANDBOX_URL: &str = "https://api-public.sandbox.gdax.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GDAX REST API client
///
/// One client serves both public and private endpoints: each `CB-ACCESS-*`
/// header is attached only when the matching credential part is non-empty,
/// so a client built with [`Credentials::public`] simply sends none of them.
///
/// Holds no per-call state; cloning is cheap and concurrent calls against
/// one instance are fine.
///
/// # Example
///
/// ```no_run
/// use gdax_rest::{Credentials, GdaxRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = GdaxRestClient::production(Credentials::public());
///     let time = client.get_time().await?;
///     println!("server time: {}", time.iso);
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = GdaxRestClient::production(creds);
///     let volume = auth_client.get_trailing_volume().await?;
///     println!("{} products traded", volume.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct GdaxRestClient {
    http_client: Client,
    base_url: String,
    credentials: Credentials,
}

impl GdaxRestClient {
    /// Create a client against the production API
    pub fn production(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::new(credentials))
    }

    /// Create a client against the public sandbox
    pub fn sandbox(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::new(credentials).with_base_url(SANDBOX_URL))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or("gdax-rest/0.1.0"))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: config.base_url,
            credentials: config.credentials,
        }
    }

    /// Check if the client can sign requests for private endpoints
    pub fn can_sign(&self) -> bool {
        self.credentials.can_sign()
    }

    /// Get public market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get private account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get the API server time
    pub async fn get_time(&self) -> RestResult<ServerTime> {
        self.market().get_time().await
    }

    /// List tradable products
    pub async fn get_products(&self) -> RestResult<Vec<Product>> {
        self.market().get_products().await
    }

    /// List known currencies
    pub async fn get_currencies(&self) -> RestResult<Vec<Currency>> {
        self.market().get_currencies().await
    }

    /// Get 24-hour statistics for a product
    pub async fn get_product_24hr_stats(&self, product_id: &str) -> RestResult<ProductStats> {
        self.market().get_product_24hr_stats(product_id).await
    }

    /// Get the snapshot ticker for a product
    pub async fn get_product_ticker(&self, product_id: &str) -> RestResult<ProductTicker> {
        self.market().get_product_ticker(product_id).await
    }

    /// List recent trades for a product
    pub async fn get_product_trades(&self, product_id: &str) -> RestResult<Vec<Trade>> {
        self.market().get_product_trades(product_id).await
    }

    /// Get the best bid/ask for a product
    pub async fn get_product_order_book_level1(
        &self,
        product_id: &str,
    ) -> RestResult<OrderBook<AggregatedLevel>> {
        self.market().get_product_order_book_level1(product_id).await
    }

    /// Get the aggregated order book for a product
    pub async fn get_product_order_book_level2(
        &self,
        product_id: &str,
    ) -> RestResult<OrderBook<AggregatedLevel>> {
        self.market().get_product_order_book_level2(product_id).await
    }

    /// Get the full, per-order book for a product
    pub async fn get_product_order_book_level3(
        &self,
        product_id: &str,
    ) -> RestResult<OrderBook<OrderLevel>> {
        self.market().get_product_order_book_level3(product_id).await
    }

    /// Get historic rates (candles) for a product
    pub async fn get_product_historic_rates(
        &self,
        product_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        granularity: Granularity,
    ) -> RestResult<Vec<Candle>> {
        self.market()
            .get_product_historic_rates(product_id, start, end, granularity)
            .await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get the status of a previously requested report
    pub async fn get_report_status(&self, report_id: &str) -> RestResult<ReportStatus> {
        self.account().get_report_status(report_id).await
    }

    /// Get 30-day trailing volume per product
    pub async fn get_trailing_volume(&self) -> RestResult<Vec<TrailingVolume>> {
        self.account().get_trailing_volume().await
    }

    // ========================================================================
    // Request Pipeline
    // ========================================================================

    /// Issue a GET request through the signed pipeline
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> RestResult<T> {
        self.request(Method::GET, path, query, None::<&()>).await
    }

    /// Issue a POST request through the signed pipeline
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RestResult<T> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// Issue a DELETE request through the signed pipeline
    pub async fn delete<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> RestResult<T> {
        self.request(Method::DELETE, path, &[], body).await
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> RestResult<T> {
        // Timestamp is generated at request-build time and doubles as the
        // signature nonce.
        let timestamp = unix_timestamp();
        let request_path = format_request_path(path, query)?;

        // No body serializes to "", never "null": the canonical message and
        // the wire bytes must agree.
        let body_string = match body {
            Some(body) => serde_json::to_string(body)
                .map_err(|e| RestError::Decode(format!("request body: {}", e)))?,
            None => String::new(),
        };

        let signature =
            self.credentials
                .sign(&timestamp, method.as_str(), &request_path, &body_string)?;

        debug!(path = %request_path, body = %body_string, "sending request");

        let url = format!("{}{}", self.base_url, request_path);
        let mut request = self
            .http_client
            .request(method, &url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("CB-ACCESS-TIMESTAMP", timestamp.as_str());
        for (name, value) in auth_headers(&self.credentials, signature.as_deref()) {
            request = request.header(name, value);
        }
        if !body_string.is_empty() {
            request = request.body(body_string);
        }

        let response = request.send().await?;
        let status = response.status();
        let body_data = response.bytes().await?;

        debug!(
            path = %request_path,
            %status,
            body = %String::from_utf8_lossy(&body_data),
            "request completed"
        );

        if status != StatusCode::OK {
            return Err(decode_error(status, &body_data));
        }
        serde_json::from_slice(&body_data).map_err(|e| RestError::Decode(e.to_string()))
    }
}

impl std::fmt::Debug for GdaxRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GdaxRestClient")
            .field("base_url", &self.base_url)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials; [`Credentials::public`] for unauthenticated access
    pub credentials: Credentials,
    /// Base URL of the REST API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for the production API
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: PRODUCTION_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Credentials::public())
    }
}

/// Auth headers for one request
///
/// A pure function from credentials to present/absent headers: each
/// `CB-ACCESS-*` header appears only when its credential part is non-empty,
/// independently of the other two.
fn auth_headers<'a>(
    credentials: &'a Credentials,
    signature: Option<&'a str>,
) -> Vec<(&'static str, &'a str)> {
    let mut headers = Vec::new();
    if !credentials.key().is_empty() {
        headers.push(("CB-ACCESS-KEY", credentials.key()));
    }
    if !credentials.passphrase().is_empty() {
        headers.push(("CB-ACCESS-PASSPHRASE", credentials.passphrase()));
    }
    if let Some(signature) = signature {
        headers.push(("CB-ACCESS-SIGN", signature));
    }
    headers
}

/// Format `path[?query]`
///
/// Parameters are key-sorted (ties broken by value) before encoding so the
/// same logical request always produces the same path, and therefore the
/// same signature.
fn format_request_path(path: &str, query: &[(&str, &str)]) -> RestResult<String> {
    if query.is_empty() {
        return Ok(path.to_string());
    }
    let mut pairs = query.to_vec();
    pairs.sort();
    let encoded = serde_urlencoded::to_string(&pairs)
        .map_err(|e| RestError::Decode(format!("query parameters: {}", e)))?;
    Ok(format!("{}?{}", path, encoded))
}

/// Decode a non-2xx body as the `{"message": ...}` envelope
///
/// An error body that does not match the envelope is a decode failure in
/// its own right, kept distinct from transport errors.
fn decode_error(status: StatusCode, body: &[u8]) -> RestError {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        message: String,
    }

    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => RestError::Api {
            status,
            message: envelope.message,
        },
        Err(e) => RestError::Decode(e.to_string()),
    }
}

/// Current time in whole seconds, as the decimal string that is both signed
/// and sent in `CB-ACCESS-TIMESTAMP`
fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
        .to_string()
}
