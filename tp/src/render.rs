//! Terminal rendering of generated itineraries

use colored::Colorize;
use serde_json::Value;

use crate::domain::ItineraryData;

/// Render a normalized response to a printable string
///
/// Accepts either the full normalized response (itinerary under
/// `itinerary_data`) or a bare itinerary object. Takes raw JSON so
/// enhancement fields that have no typed home (`ai_enhanced_features`) can
/// still be shown.
pub fn render_itinerary(raw: &Value) -> String {
    let payload = raw.get("itinerary_data").unwrap_or(raw);
    let data: ItineraryData = serde_json::from_value(payload.clone()).unwrap_or_default();
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}\n",
        format!("═══ {} · {} days ═══", data.destination, data.total_days)
            .bright_cyan()
            .bold()
    ));
    if !data.overall_summary.is_empty() {
        out.push_str(&format!("{}\n", data.overall_summary));
    }
    if !data.generation_time.is_empty() {
        out.push_str(&format!("{}\n", format!("Generated: {}", data.generation_time).dimmed()));
    }

    if let Some(seasonal) = &data.seasonal_info {
        if !seasonal.current_season.is_empty() || !seasonal.season_suggestion.is_empty() {
            out.push('\n');
            out.push_str(&format!("{}\n", "Season".bright_yellow().bold()));
            if !seasonal.current_season.is_empty() {
                out.push_str(&format!("  {}\n", seasonal.current_season));
            }
            if !seasonal.season_suggestion.is_empty() {
                out.push_str(&format!("  {}\n", seasonal.season_suggestion));
            }
            if !seasonal.city_suggestion.is_empty() {
                out.push_str(&format!("  {}\n", seasonal.city_suggestion));
            }
        }
    }

    for day in &data.daily_itineraries {
        out.push('\n');
        out.push_str(&format!("{}\n", format!("Day {}", day.day).bright_green().bold()));
        if !day.description.is_empty() {
            out.push_str(&format!("  {}\n", day.description));
        }

        for item in &day.schedule {
            let window = format!("{}-{}", item.arrival_time, item.departure_time);
            let detail = if item.duration_hours > 0.0 {
                format!("({}, {}h)", item.spot.kind, item.duration_hours)
            } else {
                format!("({})", item.spot.kind)
            };
            out.push_str(&format!(
                "  {} {} {}\n",
                window.yellow(),
                item.spot.name.bright_white(),
                detail.dimmed()
            ));
            if !item.spot.description.is_empty() {
                out.push_str(&format!("      {}\n", item.spot.description.dimmed()));
            }
            if let Some(transport) = &item.transportation {
                out.push_str(&format!("      {}\n", format!("↳ {}", transport).dimmed()));
            }
        }

        for dining in &day.dining_suggestions {
            let names: Vec<&str> = dining.options.iter().map(|o| o.name.as_str()).collect();
            if !names.is_empty() {
                out.push_str(&format!(
                    "  {} {}\n",
                    format!("{}:", dining.time_of_day).cyan(),
                    names.join(" / ")
                ));
            }
        }

        if !day.accommodation_suggestion.is_empty() {
            out.push_str(&format!(
                "  {} {}\n",
                "Stay:".cyan(),
                day.accommodation_suggestion
            ));
        }
    }

    let tips = render_tip_list("Travel Tips", &data.travel_tips);
    out.push_str(&tips);
    let seasonal_tips = render_tip_list("Seasonal Tips", &data.seasonal_tips);
    out.push_str(&seasonal_tips);

    if let Some(features) = raw.get("ai_enhanced_features").and_then(Value::as_array) {
        let names: Vec<&str> = features.iter().filter_map(Value::as_str).collect();
        if !names.is_empty() {
            out.push('\n');
            out.push_str(&format!(
                "{} {}\n",
                "Enhanced with:".dimmed(),
                names.join(", ").dimmed()
            ));
        }
    }

    out
}

fn render_tip_list(title: &str, tips: &[String]) -> String {
    if tips.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{}\n", title.bright_yellow().bold()));
    for tip in tips {
        out.push_str(&format!("  • {}\n", tip));
    }
    out
}
