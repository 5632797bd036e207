//! Planner error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the planning backend
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),
}

impl PlannerError {
    /// Whether the same request may succeed if sent again
    ///
    /// City-not-found and validation problems need the user to change the
    /// input first, so they are not retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            PlannerError::Network(_) => true,
            PlannerError::Timeout(_) => true,
            // Same transient set the client retries on
            PlannerError::ApiError { status, .. } => {
                *status >= 500 || matches!(status, 408 | 429)
            }
            PlannerError::InvalidResponse(_) => true,
            PlannerError::Json(_) => true,
            PlannerError::CityNotFound(_) => false,
            PlannerError::Validation(_) => false,
        }
    }

    /// One-line message for the user-facing error banner
    pub fn banner(&self) -> String {
        match self {
            PlannerError::Network(_) => {
                "Network problem. Check your connection and try again.".to_string()
            }
            PlannerError::Timeout(_) => {
                "The request timed out. Complex itineraries can take a while; try again or reduce the day count."
                    .to_string()
            }
            PlannerError::ApiError { status, .. } => {
                format!("The planning service returned an error ({}). Try again later.", status)
            }
            PlannerError::InvalidResponse(_) | PlannerError::Json(_) => {
                "The planning service sent back something unreadable. Try again later.".to_string()
            }
            PlannerError::CityNotFound(city) => {
                format!("I couldn't find \"{}\". Check the city name or try another.", city)
            }
            PlannerError::Validation(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        assert!(
            PlannerError::ApiError {
                status: 500,
                message: "boom".to_string()
            }
            .is_retryable()
        );
        assert!(PlannerError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(PlannerError::InvalidResponse("bad".to_string()).is_retryable());

        // 408/429 stay transient even after retries are exhausted
        for status in [408u16, 429] {
            assert!(
                PlannerError::ApiError {
                    status,
                    message: "slow down".to_string()
                }
                .is_retryable(),
                "{}",
                status
            );
        }

        assert!(!PlannerError::CityNotFound("Atlantis".to_string()).is_retryable());
        assert!(!PlannerError::Validation("days out of range".to_string()).is_retryable());
        assert!(
            !PlannerError::ApiError {
                status: 400,
                message: "bad request".to_string()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_banner_mentions_city() {
        let banner = PlannerError::CityNotFound("Atlantis".to_string()).banner();
        assert!(banner.contains("Atlantis"));
    }
}
