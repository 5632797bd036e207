//! Best-effort error reporting
//!
//! Server-side failures are reported back to the backend so operators can see
//! client-observed errors. Fire and forget: reporting must never slow down or
//! fail the primary flow.

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::PlannerError;

/// Payload for `POST /api/error-report`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub stack: String,
    pub url: String,
    pub timestamp: String,
}

impl ErrorReport {
    /// Build a report from a planner error and the endpoint it hit
    pub fn from_error(error: &PlannerError, url: &str) -> Self {
        Self {
            error: error.banner(),
            stack: format!("{:?}", error),
            url: url.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Send a report, ignoring every possible failure
///
/// Only worth calling for retryable (server-side) errors; input problems are
/// the user's to fix and not reportable.
pub async fn send_report(http: &Client, base_url: &str, report: &ErrorReport) {
    let url = format!("{}/api/error-report", base_url.trim_end_matches('/'));
    debug!(%url, "send_report: posting error report");
    let _ = http.post(&url).json(report).send().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_expected_fields() {
        let err = PlannerError::ApiError {
            status: 500,
            message: "boom".to_string(),
        };
        let report = ErrorReport::from_error(&err, "http://localhost:5000/plan");

        let value = serde_json::to_value(&report).unwrap();
        assert!(value["error"].as_str().unwrap().contains("500"));
        assert_eq!(value["url"], "http://localhost:5000/plan");
        assert!(value["stack"].as_str().unwrap().contains("ApiError"));
        // RFC 3339 timestamp
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }
}
