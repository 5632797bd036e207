//! Domain types for travel planning
//!
//! Request-side types (what the user asks for) and response-side types
//! (what the backend returns, decoded leniently for display).

mod itinerary;
mod request;

pub use itinerary::{
    DailyItinerary, DiningSuggestion, ItineraryData, ScheduleItem, SeasonalInfo, Spot,
};
pub use request::{MAX_DAYS, MIN_DAYS, Preference, RequestDraft, TravelRequest};
