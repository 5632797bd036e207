//! Free-text extraction for wizard input
//!
//! Each parser looks only at what its state needs: a city is any reasonably
//! long string, a day count is the first integer anywhere in the message, and
//! preferences are keyword containment matches against the fixed vocabulary.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{MAX_DAYS, MIN_DAYS, Preference};

static DAYS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Minimum character count for a plausible city name
const MIN_CITY_CHARS: usize = 2;

/// Parse a city name, `None` if too short to be one
pub fn parse_city(input: &str) -> Option<String> {
    let city = input.trim();
    if city.chars().count() < MIN_CITY_CHARS {
        return None;
    }
    Some(city.to_string())
}

/// Extract a day count from free text
///
/// Takes the first integer in the message ("大概5天吧" -> 5) and range-checks
/// it. Non-numeric input and out-of-range counts are both `None`.
pub fn parse_days(input: &str) -> Option<u32> {
    let m = DAYS_RE.find(input)?;
    let days: u32 = m.as_str().parse().ok()?;
    if (MIN_DAYS..=MAX_DAYS).contains(&days) {
        Some(days)
    } else {
        None
    }
}

/// Extract preference tags mentioned in free text
///
/// A tag matches if the message contains its wire key (case-insensitive) or
/// its display label. Each tag is recorded at most once, in vocabulary order,
/// so re-mentions are idempotent.
pub fn parse_preferences(input: &str) -> Vec<Preference> {
    let lower = input.to_lowercase();
    Preference::ALL
        .into_iter()
        .filter(|p| lower.contains(p.key()) || lower.contains(p.label()))
        .collect()
}

/// Yes/no/other classification for the confirmation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Affirmative,
    Negative,
    Other,
}

const AFFIRMATIVE: &[&str] = &["是", "对", "没错", "yes", "ok", "确认"];
const NEGATIVE: &[&str] = &["不", "否", "修改", "no", "change"];

/// Classify a confirmation reply by keyword containment
///
/// Negation wins over affirmation so that "不对" reads as a correction, not
/// as the "对" it contains.
pub fn parse_answer(input: &str) -> Answer {
    let lower = input.trim().to_lowercase();
    if lower == "n" || NEGATIVE.iter().any(|kw| lower.contains(kw)) {
        Answer::Negative
    } else if lower == "y" || AFFIRMATIVE.iter().any(|kw| lower.contains(kw)) {
        Answer::Affirmative
    } else {
        Answer::Other
    }
}
