use crate::config::Config;
use crate::models::{
    analysis::{DescriptiveAnalysis, EnhancedAnalysis},
    catalog::{AmcList, CategoryList},
    error::AppError,
    forecast::{ComparisonRequest, ComparisonResponse, ForecastRequest, ForecastResponse},
    fund::{FundFilter, FundsResponse},
    health::HealthStatus,
    market::{DashboardData, MarketTrends},
    performers::{TopPerformersQuery, TopPerformersResponse},
    recommendation::{RecommendationRequest, RecommendationResponse},
};
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

// API CONFIGURATION
/// Configuration for the fund analytics backend client.
///
/// The base URL is resolved once, when the config is built, and never changes
/// for the lifetime of the client holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Resolves the base URL from the runtime environment, then the build
    /// environment, then the local default.
    pub fn from_env() -> Result<Self, AppError> {
        let runtime = std::env::var(Config::API_URL_ENV).ok();
        let build_time = option_env!("FUND_API_URL").map(str::to_string);

        let mut builder = Self::builder();
        if let Some(url) = runtime.or(build_time) {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a backend path, e.g. `/api/amcs`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Top performers URL with the query string in wire order.
    pub fn top_performers_url(&self, query: &TopPerformersQuery) -> Result<Url, AppError> {
        Url::parse_with_params(&self.endpoint("/api/top-performers"), query.pairs())
            .map_err(|e| AppError::Config(format!("Invalid top performers URL: {e}")))
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL (stub backends in tests, deployments).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the `ApiConfig`, rejecting anything that is not an http(s) URL.
    pub fn build(self) -> Result<ApiConfig, AppError> {
        let raw = self
            .base_url
            .unwrap_or_else(|| Config::DEFAULT_API_URL.to_string());
        let base_url = raw.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .map_err(|e| AppError::Config(format!("Invalid API base URL {raw:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "API base URL must use http or https: {raw}"
            )));
        }

        Ok(ApiConfig { base_url })
    }
}

// FUND API CLIENT
/// HTTP client for the mutual fund analytics backend.
///
/// Every method issues exactly one fresh request: no cache, no retry.
/// Calls are independent, so callers may run any number of them concurrently.
///
/// Requests and failures are emitted as `tracing` events for native consumers
/// that install a subscriber, such as the test suite. The browser app installs
/// none; its screens report failures through `gloo::console`.
#[derive(Debug)]
pub struct FundApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl FundApiClient {
    /// Creates a client whose base URL comes from the environment.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::from_env()?)
    }

    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn health_check(&self) -> Result<HealthStatus, AppError> {
        self.get("/").await
    }

    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, AppError> {
        self.post("/api/recommend", request).await
    }

    pub async fn get_amcs(&self) -> Result<AmcList, AppError> {
        self.get("/api/amcs").await
    }

    pub async fn get_categories(&self) -> Result<CategoryList, AppError> {
        self.get("/api/categories").await
    }

    pub async fn get_dashboard_data(&self) -> Result<DashboardData, AppError> {
        self.get("/api/dashboard-data").await
    }

    pub async fn get_market_trends(&self) -> Result<MarketTrends, AppError> {
        self.get("/api/market-trends").await
    }

    pub async fn get_descriptive_analysis(&self) -> Result<DescriptiveAnalysis, AppError> {
        self.get("/api/descriptive-analysis").await
    }

    pub async fn get_enhanced_analysis(&self) -> Result<EnhancedAnalysis, AppError> {
        self.get("/api/enhanced-analysis").await
    }

    pub async fn get_funds(&self, filter: &FundFilter) -> Result<FundsResponse, AppError> {
        self.post("/api/funds", filter).await
    }

    pub async fn get_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, AppError> {
        self.post("/api/forecast", request).await
    }

    pub async fn compare_funds(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResponse, AppError> {
        self.post("/api/compare-funds", request).await
    }

    pub async fn get_top_performers(
        &self,
        query: &TopPerformersQuery,
    ) -> Result<TopPerformersResponse, AppError> {
        let url = self.config.top_performers_url(query)?;
        self.execute(self.http.get(url), "GET", "/api/top-performers")
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.config.endpoint(path);
        self.execute(self.http.get(url), "GET", path).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        self.execute(self.http.post(url).json(body), "POST", path)
            .await
    }

    /// Sends a prepared request and decodes a 2xx JSON body into `T`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<T, AppError> {
        tracing::debug!(method, path, "sending backend request");

        let response = request
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(method, path, error = %e, "backend request failed");
                self.classify_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(method, path, error = %e, "failed to read error body");
                    String::new()
                }
            };
            tracing::warn!(
                method,
                path,
                status = status.as_u16(),
                "backend returned an error status"
            );
            return Err(self.error_for_status(status, body));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(method, path, error = %e, "unexpected response body");
            AppError::Shape(format!("{method} {path}: {e}"))
        })
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_decode() {
            AppError::Shape(format!("Failed to read response: {error}"))
        } else if error.is_timeout() {
            AppError::Transport(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::Transport(format!("Request error: {error}"))
        } else {
            AppError::Transport(format!("Network error: {error}"))
        }
    }

    /// Creates an error for a non-2xx status, keeping the body for diagnostics.
    fn error_for_status(&self, status: StatusCode, body: String) -> AppError {
        AppError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::performers::TopMetric;

    #[test]
    fn test_config_builder_defaults() {
        let config = ApiConfig::builder().build().unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = ApiConfig::builder()
            .base_url("https://funds.example.com/")
            .build()
            .unwrap();
        assert_eq!(
            config.endpoint("/api/amcs"),
            "https://funds.example.com/api/amcs"
        );
    }

    #[test]
    fn test_config_rejects_bad_urls() {
        for url in ["not a url", "ftp://funds.example.com", ""] {
            let err = ApiConfig::builder().base_url(url).build().unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{url:?} should be rejected");
        }
    }

    #[test]
    fn test_top_performers_url_defaults() {
        let config = ApiConfig::builder().build().unwrap();
        let url = config
            .top_performers_url(&TopPerformersQuery::default())
            .unwrap();
        assert_eq!(url.path(), "/api/top-performers");
        assert_eq!(url.query(), Some("metric=return_3yr&limit=10"));
    }

    #[test]
    fn test_top_performers_url_with_category() {
        let config = ApiConfig::builder().build().unwrap();
        let query = TopPerformersQuery {
            metric: TopMetric::Sharpe,
            category: Some("Large Cap".to_string()),
            limit: 5,
        };
        let url = config.top_performers_url(&query).unwrap();
        assert_eq!(
            url.query(),
            Some("metric=sharpe&category=Large+Cap&limit=5")
        );
    }

    #[test]
    fn test_error_for_status_keeps_reason_and_body() {
        let client = FundApiClient::with_config(ApiConfig::builder().build().unwrap()).unwrap();
        let err = client.error_for_status(StatusCode::NOT_FOUND, "missing".to_string());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "API Error: 404 Not Found");
    }
}
