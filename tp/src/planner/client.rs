//! HTTP client for the planning backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::PlannerError;
use crate::config::BackendConfig;
use crate::domain::TravelRequest;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Client trait for the planning backend
///
/// Object-safe so sessions can run against a test double.
#[async_trait]
pub trait PlannerApi: Send + Sync {
    /// Submit a travel request and return the raw response JSON
    async fn plan(&self, request: &TravelRequest) -> Result<Value, PlannerError>;
}

/// Production planner client over HTTP
pub struct HttpPlanner {
    base_url: String,
    http: Client,
    max_retries: u32,
    timeout: Duration,
}

impl HttpPlanner {
    /// Create a new client from configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, PlannerError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PlannerError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_retries: config.max_retries,
            timeout,
        })
    }

    /// WebSocket URL for progress updates, derived from the base URL
    pub fn progress_ws_url(&self) -> String {
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            format!("ws://{}", self.base_url)
        };
        format!("{}/ws/progress", ws_base)
    }

    /// Decode a response body, surfacing non-JSON as `InvalidResponse`
    fn decode(status: u16, text: &str) -> Result<Value, PlannerError> {
        serde_json::from_str(text).map_err(|e| {
            debug!(status, error = %e, "decode: body is not JSON");
            PlannerError::InvalidResponse(format!("not JSON ({}): {}", status, e))
        })
    }

    /// Interpret a decoded response body
    ///
    /// The backend reports domain failures as `success: false` with a
    /// `message`; HTTP status alone does not tell the whole story.
    fn classify(status: u16, body: Value) -> Result<Value, PlannerError> {
        let success = body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(status < 400);
        if success {
            return Ok(body);
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("planning failed")
            .to_string();

        if message.contains("城市") || message.to_lowercase().contains("city") {
            return Err(PlannerError::CityNotFound(message));
        }
        if status == 400 {
            return Err(PlannerError::Validation(message));
        }
        Err(PlannerError::ApiError { status, message })
    }
}

#[async_trait]
impl PlannerApi for HttpPlanner {
    async fn plan(&self, request: &TravelRequest) -> Result<Value, PlannerError> {
        let url = format!("{}/plan", self.base_url);
        let body = request.to_plan_body();
        debug!(%url, city = %request.city, days = request.days, "plan: submitting request");

        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                warn!(attempt, backoff_ms = backoff, "plan: retrying after transient error");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            let response = match self.http.post(&url).json(&body).send().await {
                Ok(r) => r,
                Err(e) => {
                    if e.is_timeout() {
                        debug!(attempt, "plan: request timed out");
                        last_error = Some(PlannerError::Timeout(self.timeout));
                    } else {
                        debug!(attempt, error = %e, "plan: network error");
                        last_error = Some(PlannerError::Network(e));
                    }
                    continue;
                }
            };

            let status = response.status().as_u16();

            if is_retryable_status(status) && attempt < self.max_retries {
                let text = response.text().await.unwrap_or_default();
                debug!(attempt, status, "plan: retryable status");
                last_error = Some(PlannerError::ApiError { status, message: text });
                continue;
            }

            let text = response.text().await.map_err(PlannerError::Network)?;
            let decoded = Self::decode(status, &text)?;

            return Self::classify(status, decoded);
        }

        Err(last_error
            .unwrap_or_else(|| PlannerError::InvalidResponse("max retries exceeded".to_string())))
    }
}
