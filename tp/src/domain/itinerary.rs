//! Response-side itinerary types
//!
//! Decoded leniently: every field defaults, unknown fields are ignored. The
//! backend's "AI-enhanced" extension groups never make it into these structs
//! as typed fields; they are merged into the raw JSON by the normalizer and
//! surfaced here only through `seasonal_tips` and friends.

use serde::{Deserialize, Serialize};

/// A scenic spot in the schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spot {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// One timed entry in a day's schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleItem {
    pub spot: Spot,
    pub arrival_time: String,
    pub departure_time: String,
    pub duration_hours: f64,
    pub transportation: Option<String>,
}

/// Dining options for a part of the day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiningSuggestion {
    pub time_of_day: String,
    pub options: Vec<DiningOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiningOption {
    pub name: String,
    pub description: String,
}

/// One day of the generated plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyItinerary {
    pub day: u32,
    pub description: String,
    pub schedule: Vec<ScheduleItem>,
    pub dining_suggestions: Vec<DiningSuggestion>,
    pub accommodation_suggestion: String,
}

/// Seasonal context the backend attaches to a plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalInfo {
    pub current_season: String,
    pub season_suggestion: String,
    pub city_suggestion: String,
    pub recommendations: Vec<String>,
}

/// The full itinerary payload, post-normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryData {
    pub destination: String,
    pub total_days: u32,
    pub generation_time: String,
    pub overall_summary: String,
    pub seasonal_info: Option<SeasonalInfo>,
    pub daily_itineraries: Vec<DailyItinerary>,
    pub travel_tips: Vec<String>,
    pub seasonal_tips: Vec<String>,
    /// Backend-computed route statistics, kept opaque
    pub route_statistics: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_decode_ignores_unknown_and_defaults_missing() {
        let raw = serde_json::json!({
            "destination": "大理市",
            "total_days": 3,
            "daily_itineraries": [
                {
                    "day": 1,
                    "schedule": [
                        {
                            "spot": {"name": "洱海", "type": "自然风光"},
                            "arrival_time": "09:00",
                            "departure_time": "12:00",
                            "duration_hours": 3.0,
                            "crowd_level": "low"
                        }
                    ]
                }
            ],
            "route_statistics": {"total_distance_km": 42},
            "some_future_field": "ignored"
        });

        let data: ItineraryData = serde_json::from_value(raw).unwrap();
        assert_eq!(data.destination, "大理市");
        assert_eq!(
            data.route_statistics.unwrap()["total_distance_km"],
            serde_json::json!(42)
        );
        assert_eq!(data.total_days, 3);
        assert_eq!(data.daily_itineraries.len(), 1);
        assert_eq!(data.daily_itineraries[0].schedule[0].spot.name, "洱海");
        assert!(data.daily_itineraries[0].accommodation_suggestion.is_empty());
        assert!(data.seasonal_info.is_none());
    }
}
