//! Response normalization
//!
//! The backend decorates a successful plan with zero or more optional
//! "AI-enhanced" extension groups at the top level of the response. This
//! module folds them into a single display object: `itinerary_data` absorbs
//! the per-group payloads, `ai_enhanced_features` lists which groups were
//! present, and `seasonal_recommendations` collects the strings worth
//! surfacing as a secondary notice.
//!
//! Normalization never fails. Malformed or absent groups are skipped, and
//! anything that is not a JSON object passes through unchanged.

use serde_json::{Map, Value, json};
use tracing::debug;

/// One optional extension group and how to merge it
struct Extension {
    /// Top-level response field the group arrives under
    key: &'static str,
    /// Human-readable tag appended to `ai_enhanced_features`
    feature: &'static str,
    /// Merge the group's payload into the itinerary / notice list
    apply: fn(&Value, &mut Map<String, Value>, &mut Vec<Value>),
}

/// The fixed extractor table, applied in order
const EXTENSIONS: &[Extension] = &[
    Extension {
        key: "ai_optimizations",
        feature: "route optimization",
        apply: |group, itinerary, _| {
            for field in ["transport_suggestions", "timing_adjustments", "avoid_crowds"] {
                if let Some(value) = group.get(field) {
                    itinerary.insert(field.to_string(), value.clone());
                }
            }
        },
    },
    Extension {
        key: "ai_personalization",
        feature: "personalized tips",
        apply: |group, itinerary, _| {
            let tips = group.get("tips").cloned().unwrap_or_else(|| json!([]));
            itinerary.insert("personalized_tips".to_string(), tips);
            if let Some(dietary) = group.get("dietary_suggestions") {
                itinerary.insert("dietary_suggestions".to_string(), dietary.clone());
            }
        },
    },
    Extension {
        key: "weather_advisory",
        feature: "weather advisory",
        apply: |group, itinerary, notices| {
            itinerary.insert("weather_advisory".to_string(), group.clone());
            if let Some(reminder) = group.get("important_reminder") {
                notices.insert(0, reminder.clone());
            }
        },
    },
    Extension {
        key: "real_time_info",
        feature: "real-time info",
        apply: |group, itinerary, notices| {
            itinerary.insert("real_time_info".to_string(), group.clone());
            if let Some(alert) = group.get("alert") {
                notices.insert(0, alert.clone());
            }
        },
    },
    Extension {
        key: "budget_optimization",
        feature: "budget optimization",
        apply: |group, itinerary, _| {
            itinerary.insert("budget_optimization".to_string(), group.clone());
        },
    },
];

/// Normalize a raw `/plan` response into the display shape
///
/// Returns the input unchanged when it is not an object or has already been
/// processed.
pub fn normalize(raw: &Value) -> Value {
    let Some(source) = raw.as_object() else {
        return raw.clone();
    };
    if source
        .get("is_ai_processed")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return raw.clone();
    }

    let mut out = source.clone();

    // The itinerary payload may arrive under `itinerary_data` or legacy `data`
    let mut itinerary = out
        .get("itinerary_data")
        .or_else(|| out.get("data"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let mut features: Vec<String> = Vec::new();
    let mut notices: Vec<Value> = Vec::new();

    // Seasonal suggestions have two accepted shapes; handled before the
    // table so weather/real-time notices end up in front of them
    if let Some(tips) = seasonal_tips(source) {
        features.push("seasonal suggestions".to_string());
        itinerary.insert("seasonal_tips".to_string(), Value::Array(tips.clone()));
        notices.extend(tips);
    }

    for ext in EXTENSIONS {
        let Some(group) = source.get(ext.key) else {
            continue;
        };
        if group.is_null() {
            continue;
        }
        debug!(key = ext.key, "normalize: merging extension group");
        features.push(ext.feature.to_string());
        (ext.apply)(group, &mut itinerary, &mut notices);
    }

    dedup_preserving_order(&mut features);

    out.insert("is_ai_processed".to_string(), Value::Bool(true));
    out.insert("itinerary_data".to_string(), Value::Object(itinerary));
    out.insert(
        "ai_enhanced_features".to_string(),
        Value::Array(features.into_iter().map(Value::String).collect()),
    );
    out.insert(
        "seasonal_recommendations".to_string(),
        Value::Array(notices),
    );
    out.insert(
        "client_generated_at".to_string(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );

    Value::Object(out)
}

/// Strings worth showing as a secondary toast, in priority order
pub fn seasonal_recommendations(normalized: &Value) -> Vec<String> {
    normalized
        .get("seasonal_recommendations")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn seasonal_tips(source: &Map<String, Value>) -> Option<Vec<Value>> {
    if let Some(tips) = source.get("seasonal_suggestions").and_then(Value::as_array) {
        return Some(tips.clone());
    }
    source
        .get("seasonal_info")
        .and_then(|info| info.get("recommendations"))
        .and_then(Value::as_array)
        .cloned()
}

fn dedup_preserving_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
