//! Itinerary generation flow
//!
//! One place ties the pieces together: start progress display, submit the
//! request, stop progress, then normalize, persist, and render on success or
//! classify and report on failure. Both the conversation and the direct
//! `plan` command go through here.

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use itinerarystore::ItineraryStore;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::TravelRequest;
use crate::normalize::{normalize, seasonal_recommendations};
use crate::planner::{ErrorReport, HttpPlanner, PlannerApi, PlannerError, send_report};
use crate::progress::ProgressTracker;
use crate::render::render_itinerary;
use crate::wizard::SubmitOutcome;

/// Orchestrates a single generation attempt end to end
pub struct Generator {
    planner: Arc<dyn PlannerApi>,
    ws_url: Option<String>,
    store: ItineraryStore,
    http: Client,
    base_url: String,
}

impl Generator {
    /// Build the production wiring from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let planner = HttpPlanner::from_config(&config.backend)?;
        let ws_url = config.backend.ws_progress.then(|| planner.progress_ws_url());
        let store = ItineraryStore::open(&config.storage.store_path)?;

        Ok(Self {
            planner: Arc::new(planner),
            ws_url,
            store,
            http: Client::new(),
            base_url: config.backend.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Wiring with an arbitrary planner, for tests
    #[cfg(test)]
    fn with_planner(planner: Arc<dyn PlannerApi>, store: ItineraryStore) -> Self {
        Self {
            planner,
            ws_url: None,
            store,
            http: Client::new(),
            base_url: "http://localhost:5000".to_string(),
        }
    }

    pub fn store(&self) -> &ItineraryStore {
        &self.store
    }

    /// Run one generation attempt
    ///
    /// On success the normalized response is saved and returned; when
    /// `render` is set the itinerary and any seasonal notices are printed.
    /// On failure a banner is printed, server-side errors are reported back
    /// to the backend, and the outcome tells the conversation where to
    /// resume.
    pub async fn generate(
        &self,
        request: &TravelRequest,
        render: bool,
    ) -> (SubmitOutcome, Option<Value>) {
        let tracker = ProgressTracker::start(self.ws_url.clone());
        let result = self.planner.plan(request).await;
        tracker.finish();

        match result {
            Ok(body) => {
                let normalized = normalize(&body);
                info!(city = %request.city, days = request.days, "generate: itinerary received");

                if let Err(e) = self.store.save(&normalized) {
                    warn!(error = %e, "generate: failed to save itinerary");
                    eprintln!("{}", format!("(could not save itinerary: {})", e).dimmed());
                }

                if render {
                    print!("{}", render_itinerary(&normalized));
                    // One secondary notice at most, the highest-priority one
                    if let Some(notice) = seasonal_recommendations(&normalized).first() {
                        println!("{} {}", "※".yellow(), notice.yellow());
                    }
                }

                (SubmitOutcome::Success, Some(normalized))
            }
            Err(err) => {
                warn!(error = %err, "generate: request failed");
                eprintln!("{} {}", "✗".red(), err.banner().red());

                if err.is_retryable() {
                    let report = ErrorReport::from_error(&err, &format!("{}/plan", self.base_url));
                    send_report(&self.http, &self.base_url, &report).await;
                }

                (classify_failure(&err), None)
            }
        }
    }
}

/// Map a planner error to where the conversation should resume
///
/// Input-correction errors send the machine back to the offending field so
/// an unchanged confirmation cannot re-send the rejected request; everything
/// else returns to the confirmation step for a retry.
fn classify_failure(err: &PlannerError) -> SubmitOutcome {
    match err {
        PlannerError::CityNotFound(_) => SubmitOutcome::BadCity,
        PlannerError::Validation(message) => {
            if message.contains("天数") || message.to_lowercase().contains("day") {
                SubmitOutcome::InvalidDays
            } else {
                SubmitOutcome::BadCity
            }
        }
        _ => SubmitOutcome::RetryableFailure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    struct FixedPlanner(Result<Value, fn() -> PlannerError>);

    #[async_trait]
    impl PlannerApi for FixedPlanner {
        async fn plan(&self, _request: &TravelRequest) -> Result<Value, PlannerError> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn request() -> TravelRequest {
        TravelRequest {
            city: "北京".to_string(),
            province: String::new(),
            days: 3,
            preferences: vec![crate::domain::Preference::Culture],
            travel_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_success_saves_normalized_response() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path()).unwrap();
        let planner = FixedPlanner(Ok(json!({
            "success": true,
            "itinerary_data": { "destination": "北京市", "total_days": 3 },
            "seasonal_suggestions": ["avoid golden week"]
        })));

        let generator = Generator::with_planner(Arc::new(planner), store);
        let (outcome, normalized) = generator.generate(&request(), false).await;

        assert_eq!(outcome, SubmitOutcome::Success);
        let normalized = normalized.unwrap();
        assert_eq!(normalized["is_ai_processed"], true);

        let saved = generator.store().load_session().unwrap().unwrap();
        assert_eq!(saved["itinerary_data"]["destination"], "北京市");
        assert_eq!(saved["seasonal_recommendations"], json!(["avoid golden week"]));
    }

    #[tokio::test]
    async fn test_city_not_found_maps_to_bad_city_and_saves_nothing() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path()).unwrap();
        let planner = FixedPlanner(Err(|| PlannerError::CityNotFound("无法识别城市".to_string())));

        let generator = Generator::with_planner(Arc::new(planner), store);
        let (outcome, normalized) = generator.generate(&request(), false).await;

        assert_eq!(outcome, SubmitOutcome::BadCity);
        assert!(normalized.is_none());
        assert!(generator.store().load_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validation_error_returns_to_offending_field() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path()).unwrap();
        let planner = FixedPlanner(Err(|| {
            PlannerError::Validation("行程天数必须在1-30天之间".to_string())
        }));

        let generator = Generator::with_planner(Arc::new(planner), store);
        let (outcome, _) = generator.generate(&request(), false).await;

        // Re-confirming must not re-send the identical rejected request
        assert_ne!(outcome, SubmitOutcome::RetryableFailure);
        assert_eq!(outcome, SubmitOutcome::InvalidDays);
    }

    #[test]
    fn test_classify_failure_by_field() {
        let days = PlannerError::Validation("days must be between 1 and 30".to_string());
        assert_eq!(classify_failure(&days), SubmitOutcome::InvalidDays);

        let city = PlannerError::Validation("城市或省份不能为空".to_string());
        assert_eq!(classify_failure(&city), SubmitOutcome::BadCity);

        let not_found = PlannerError::CityNotFound("Atlantis".to_string());
        assert_eq!(classify_failure(&not_found), SubmitOutcome::BadCity);

        let server = PlannerError::InvalidResponse("not JSON".to_string());
        assert_eq!(classify_failure(&server), SubmitOutcome::RetryableFailure);
    }

    #[tokio::test]
    async fn test_unreadable_response_saves_nothing() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path()).unwrap();
        let planner = FixedPlanner(Err(|| {
            PlannerError::InvalidResponse("not JSON (200): expected value".to_string())
        }));

        let generator = Generator::with_planner(Arc::new(planner), store);
        let (outcome, normalized) = generator.generate(&request(), false).await;

        assert_eq!(outcome, SubmitOutcome::RetryableFailure);
        assert!(normalized.is_none());
        assert!(generator.store().load_session().unwrap().is_none());
        assert!(generator.store().load_last().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_retryable() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path()).unwrap();
        let planner = FixedPlanner(Err(|| PlannerError::ApiError {
            status: 500,
            message: "boom".to_string(),
        }));

        let generator = Generator::with_planner(Arc::new(planner), store);
        let (outcome, _) = generator.generate(&request(), false).await;

        assert_eq!(outcome, SubmitOutcome::RetryableFailure);
    }
}
