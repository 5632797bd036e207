//! Travel request types

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Travel-interest preference tags
///
/// Fixed vocabulary the backend understands. Each tag has a wire key (what is
/// sent in the request) and a display label (how the original product names it
/// to users, which also works as input vocabulary in the chat wizard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Nature,
    Culture,
    Food,
    Shopping,
    Adventure,
    Relax,
    Family,
    Photography,
}

impl Preference {
    /// All tags, in menu order
    pub const ALL: [Preference; 8] = [
        Preference::Nature,
        Preference::Culture,
        Preference::Food,
        Preference::Shopping,
        Preference::Adventure,
        Preference::Relax,
        Preference::Family,
        Preference::Photography,
    ];

    /// Wire key sent to the backend
    pub fn key(self) -> &'static str {
        match self {
            Preference::Nature => "nature",
            Preference::Culture => "culture",
            Preference::Food => "food",
            Preference::Shopping => "shopping",
            Preference::Adventure => "adventure",
            Preference::Relax => "relax",
            Preference::Family => "family",
            Preference::Photography => "photography",
        }
    }

    /// Display label (the product's Chinese vocabulary)
    pub fn label(self) -> &'static str {
        match self {
            Preference::Nature => "自然风光",
            Preference::Culture => "历史文化",
            Preference::Food => "美食探索",
            Preference::Shopping => "购物娱乐",
            Preference::Adventure => "冒险体验",
            Preference::Relax => "休闲度假",
            Preference::Family => "亲子活动",
            Preference::Photography => "摄影观光",
        }
    }
}

impl std::fmt::Display for Preference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key(), self.label())
    }
}

impl std::str::FromStr for Preference {
    type Err = String;

    /// Accepts the wire key or the Chinese label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Preference::ALL
            .into_iter()
            .find(|p| p.key() == needle || p.label() == needle)
            .ok_or_else(|| {
                format!(
                    "unknown preference '{}'; expected one of: {}",
                    s,
                    Preference::ALL.map(|p| p.key()).join(", ")
                )
            })
    }
}

/// Bounds on trip length accepted by the backend
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 30;

/// A complete, validated planning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub city: String,
    #[serde(default)]
    pub province: String,
    pub days: u32,
    pub preferences: Vec<Preference>,
    pub travel_date: NaiveDate,
}

impl TravelRequest {
    /// Check the request against backend constraints
    ///
    /// City or province must be present, days in range, at least one
    /// preference.
    pub fn validate(&self) -> Result<(), String> {
        if self.city.trim().is_empty() && self.province.trim().is_empty() {
            return Err("a city or province is required".to_string());
        }
        if self.days < MIN_DAYS || self.days > MAX_DAYS {
            return Err(format!(
                "days must be between {} and {}",
                MIN_DAYS, MAX_DAYS
            ));
        }
        if self.preferences.is_empty() {
            return Err("at least one preference is required".to_string());
        }
        Ok(())
    }

    /// Build the JSON body for `POST /plan`
    ///
    /// Carries the AI-enhancement flag and a client timestamp alongside the
    /// request fields, matching the backend contract.
    pub fn to_plan_body(&self) -> serde_json::Value {
        serde_json::json!({
            "city": self.city,
            "province": self.province,
            "days": self.days,
            "preferences": self.preferences,
            "travel_date": self.travel_date.format("%Y-%m-%d").to_string(),
            "is_ai_enhanced": true,
            "client_timestamp": Utc::now().timestamp_millis(),
        })
    }
}

/// Partially collected request, filled in by the wizard one field at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDraft {
    pub city: Option<String>,
    pub province: Option<String>,
    pub days: Option<u32>,
    pub preferences: Vec<Preference>,
    pub travel_date: Option<NaiveDate>,
}

impl RequestDraft {
    /// Convert to a full request once every field is collected
    ///
    /// The travel date defaults to today when the user never gave one.
    pub fn into_request(self) -> Option<TravelRequest> {
        Some(TravelRequest {
            city: self.city?,
            province: self.province.unwrap_or_default(),
            days: self.days?,
            preferences: if self.preferences.is_empty() {
                return None;
            } else {
                self.preferences
            },
            travel_date: self
                .travel_date
                .unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}
