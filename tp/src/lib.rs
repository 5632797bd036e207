//! TripPlanner - conversational travel itinerary client
//!
//! A terminal client for an itinerary-generation backend. The user is walked
//! through a short fixed-order interview (city, days, preferences,
//! confirmation), the collected request is POSTed to the backend, and the
//! response is normalized, persisted, and rendered. Progress is shown while
//! the request is in flight, simulated locally with an optional WebSocket
//! feed of real updates.
//!
//! # Modules
//!
//! - [`wizard`] - Conversation state machine and interactive session
//! - [`planner`] - HTTP client for the planning backend
//! - [`normalize`] - Folding of optional AI-enhancement groups into one shape
//! - [`progress`] - In-flight progress display
//! - [`domain`] - Request and itinerary types
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod generate;
pub mod normalize;
pub mod planner;
pub mod progress;
pub mod render;
pub mod wizard;

// Re-export commonly used types
pub use config::{BackendConfig, Config, StorageConfig};
pub use domain::{
    DailyItinerary, ItineraryData, MAX_DAYS, MIN_DAYS, Preference, RequestDraft, TravelRequest,
};
pub use generate::Generator;
pub use normalize::{normalize, seasonal_recommendations};
pub use planner::{ErrorReport, HttpPlanner, PlannerApi, PlannerError, send_report};
pub use progress::{Progress, ProgressTracker, parse_progress_event};
pub use render::render_itinerary;
pub use wizard::{ConversationState, SubmitOutcome, Turn, WizardMachine, WizardSession};
