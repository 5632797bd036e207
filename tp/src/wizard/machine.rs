//! Conversation state machine
//!
//! Pure transition core for the planning wizard: no I/O, no clock, no
//! network. Each user message is parsed only according to the current state;
//! unrecognized input re-prompts without advancing. The session layer owns
//! everything else (readline, HTTP, storage).

use crate::domain::{MAX_DAYS, MIN_DAYS, Preference, RequestDraft, TravelRequest};
use crate::wizard::extract::{self, Answer};

/// Where the conversation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    AwaitingCity,
    AwaitingDays,
    AwaitingPreferences,
    AwaitingConfirmation,
    Complete,
}

/// Result of feeding one user message to the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Show this reply and keep reading input
    Reply(String),
    /// Show the reply and submit the request; exactly one per confirmation
    Submit(TravelRequest, String),
}

impl Turn {
    pub fn reply(&self) -> &str {
        match self {
            Turn::Reply(text) | Turn::Submit(_, text) => text,
        }
    }
}

/// The wizard's state plus the partially collected request
#[derive(Debug, Clone)]
pub struct WizardMachine {
    state: ConversationState,
    draft: RequestDraft,
}

impl Default for WizardMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardMachine {
    pub fn new() -> Self {
        Self {
            state: ConversationState::AwaitingCity,
            draft: RequestDraft::default(),
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    /// Opening prompt shown before any input
    pub fn greeting() -> String {
        "Hi! I plan multi-day city trips. Which city would you like to visit?".to_string()
    }

    /// Reset to the start of the conversation, dropping the draft
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// After a submission settles, record the outcome
    ///
    /// Success completes the conversation. A retryable failure returns to the
    /// confirmation step so the user can confirm again; an input problem
    /// returns to the offending field with that field cleared, so confirming
    /// again cannot re-send the same rejected request.
    pub fn finish(&mut self, outcome: SubmitOutcome) {
        self.state = match outcome {
            SubmitOutcome::Success => ConversationState::Complete,
            SubmitOutcome::RetryableFailure => ConversationState::AwaitingConfirmation,
            SubmitOutcome::BadCity => {
                self.draft.city = None;
                ConversationState::AwaitingCity
            }
            SubmitOutcome::InvalidDays => {
                self.draft.days = None;
                ConversationState::AwaitingDays
            }
        };
    }

    /// Feed one user message through the current state
    pub fn handle(&mut self, input: &str) -> Turn {
        match self.state {
            ConversationState::AwaitingCity => self.handle_city(input),
            ConversationState::AwaitingDays => self.handle_days(input),
            ConversationState::AwaitingPreferences => self.handle_preferences(input),
            ConversationState::AwaitingConfirmation => self.handle_confirmation(input),
            ConversationState::Complete => Turn::Reply(
                "Your itinerary is ready (see `tp result`). Use /reset to plan another trip."
                    .to_string(),
            ),
        }
    }

    fn handle_city(&mut self, input: &str) -> Turn {
        match extract::parse_city(input) {
            Some(city) => {
                let reply = format!(
                    "{} it is. How many days will you travel? ({}-{})",
                    city, MIN_DAYS, MAX_DAYS
                );
                self.draft.city = Some(city);
                self.state = ConversationState::AwaitingDays;
                Turn::Reply(reply)
            }
            None => Turn::Reply("Please give me a valid city name.".to_string()),
        }
    }

    fn handle_days(&mut self, input: &str) -> Turn {
        match extract::parse_days(input) {
            Some(days) => {
                self.draft.days = Some(days);
                self.state = ConversationState::AwaitingPreferences;
                Turn::Reply(format!(
                    "Got it, {} day(s). What are you interested in? Pick any of:\n{}",
                    days,
                    preference_menu()
                ))
            }
            None => Turn::Reply(format!(
                "Please give a day count between {} and {}.",
                MIN_DAYS, MAX_DAYS
            )),
        }
    }

    fn handle_preferences(&mut self, input: &str) -> Turn {
        let prefs = extract::parse_preferences(input);
        if prefs.is_empty() {
            return Turn::Reply(format!(
                "I didn't recognize a preference there. Pick from:\n{}",
                preference_menu()
            ));
        }
        self.draft.preferences = prefs;
        self.state = ConversationState::AwaitingConfirmation;
        Turn::Reply(format!(
            "{}\n\nShall I generate the itinerary? (yes / no)",
            self.summary()
        ))
    }

    fn handle_confirmation(&mut self, input: &str) -> Turn {
        match extract::parse_answer(input) {
            Answer::Affirmative => match self.draft.clone().into_request() {
                Some(request) => Turn::Submit(
                    request,
                    "Great, generating your itinerary now...".to_string(),
                ),
                // Unreachable by construction; re-ask rather than panic
                None => {
                    self.reset();
                    Turn::Reply(
                        "Something was missing from your request; let's start over. Which city?"
                            .to_string(),
                    )
                }
            },
            Answer::Negative => Turn::Reply(
                "Which part should change? Use /reset to start over, or confirm with \"yes\"."
                    .to_string(),
            ),
            Answer::Other => Turn::Reply(format!(
                "{}\n\nPlease answer yes or no.",
                self.summary()
            )),
        }
    }

    /// One-line-per-field recap of the collected request
    pub fn summary(&self) -> String {
        let city = self.draft.city.as_deref().unwrap_or("-");
        let days = self
            .draft
            .days
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let prefs = if self.draft.preferences.is_empty() {
            "-".to_string()
        } else {
            self.draft
                .preferences
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Here is what I have:\n  • destination: {}\n  • days: {}\n  • preferences: {}",
            city, days, prefs
        )
    }
}

/// What happened to a submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    RetryableFailure,
    /// Backend rejected the city; re-collect it
    BadCity,
    /// Backend rejected the day count; re-collect it
    InvalidDays,
}

fn preference_menu() -> String {
    Preference::ALL
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the machine through the canonical happy-path conversation
    fn confirmed_machine() -> (WizardMachine, Turn) {
        let mut m = WizardMachine::new();
        assert!(matches!(m.handle("北京"), Turn::Reply(_)));
        assert_eq!(m.state(), ConversationState::AwaitingDays);
        assert!(matches!(m.handle("3"), Turn::Reply(_)));
        assert_eq!(m.state(), ConversationState::AwaitingPreferences);
        assert!(matches!(m.handle("历史文化"), Turn::Reply(_)));
        assert_eq!(m.state(), ConversationState::AwaitingConfirmation);
        let turn = m.handle("是");
        (m, turn)
    }

    #[test]
    fn test_full_scenario_produces_one_submit() {
        let (_, turn) = confirmed_machine();
        match turn {
            Turn::Submit(request, _) => {
                assert_eq!(request.city, "北京");
                assert_eq!(request.days, 3);
                assert_eq!(request.preferences, vec![Preference::Culture]);
            }
            Turn::Reply(text) => panic!("expected submit, got reply: {}", text),
        }
    }

    #[test]
    fn test_states_advance_in_fixed_order() {
        let mut m = WizardMachine::new();
        assert_eq!(m.state(), ConversationState::AwaitingCity);
        m.handle("上海");
        assert_eq!(m.state(), ConversationState::AwaitingDays);
        m.handle("5天左右");
        assert_eq!(m.state(), ConversationState::AwaitingPreferences);
        m.handle("nature and food");
        assert_eq!(m.state(), ConversationState::AwaitingConfirmation);
        assert_eq!(
            m.draft().preferences,
            vec![Preference::Nature, Preference::Food]
        );
    }

    #[test]
    fn test_unrecognized_input_reprompts_without_advancing() {
        let mut m = WizardMachine::new();
        m.handle("x"); // too short for a city
        assert_eq!(m.state(), ConversationState::AwaitingCity);

        m.handle("杭州");
        m.handle("40"); // over the cap
        assert_eq!(m.state(), ConversationState::AwaitingDays);
        m.handle("not a number");
        assert_eq!(m.state(), ConversationState::AwaitingDays);

        m.handle("4");
        m.handle("something unrelated");
        assert_eq!(m.state(), ConversationState::AwaitingPreferences);
    }

    #[test]
    fn test_day_bounds() {
        for d in [1u32, 15, 30] {
            let mut m = WizardMachine::new();
            m.handle("成都");
            m.handle(&d.to_string());
            assert_eq!(m.state(), ConversationState::AwaitingPreferences, "d={}", d);
        }
        for input in ["0", "31", "100"] {
            let mut m = WizardMachine::new();
            m.handle("成都");
            m.handle(input);
            assert_eq!(m.state(), ConversationState::AwaitingDays, "input={}", input);
        }
    }

    #[test]
    fn test_negative_confirmation_keeps_state() {
        let mut m = WizardMachine::new();
        m.handle("西安");
        m.handle("2");
        m.handle("culture");
        let turn = m.handle("不对，要修改");
        assert!(matches!(turn, Turn::Reply(_)));
        assert_eq!(m.state(), ConversationState::AwaitingConfirmation);
        // The draft survives; an affirmative still submits
        assert!(matches!(m.handle("是的"), Turn::Submit(..)));
    }

    #[test]
    fn test_unclear_confirmation_reasks() {
        let mut m = WizardMachine::new();
        m.handle("西安");
        m.handle("2");
        m.handle("culture");
        let turn = m.handle("嗯");
        assert!(turn.reply().contains("yes or no"));
        assert_eq!(m.state(), ConversationState::AwaitingConfirmation);
    }

    #[test]
    fn test_finish_outcomes() {
        let (mut m, _) = confirmed_machine();

        let mut success = m.clone();
        success.finish(SubmitOutcome::Success);
        assert_eq!(success.state(), ConversationState::Complete);
        assert!(matches!(success.handle("thanks"), Turn::Reply(_)));

        let mut retry = m.clone();
        retry.finish(SubmitOutcome::RetryableFailure);
        assert_eq!(retry.state(), ConversationState::AwaitingConfirmation);
        assert!(matches!(retry.handle("yes"), Turn::Submit(..)));

        let mut days = m.clone();
        days.finish(SubmitOutcome::InvalidDays);
        assert_eq!(days.state(), ConversationState::AwaitingDays);
        assert!(days.draft().days.is_none());
        // The rest of the draft survives; a new day count re-confirms
        assert_eq!(days.draft().city.as_deref(), Some("北京"));
        days.handle("5");
        assert_eq!(days.state(), ConversationState::AwaitingPreferences);

        m.finish(SubmitOutcome::BadCity);
        assert_eq!(m.state(), ConversationState::AwaitingCity);
        assert!(m.draft().city.is_none());
    }

    #[test]
    fn test_reset_clears_draft() {
        let (mut m, _) = confirmed_machine();
        m.reset();
        assert_eq!(m.state(), ConversationState::AwaitingCity);
        assert_eq!(m.draft(), &RequestDraft::default());
    }
}
