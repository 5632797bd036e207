//! Conversational planning wizard
//!
//! A fixed-order interview (city, days, preferences, confirmation) built as a
//! pure state machine plus a readline session around it.

mod extract;
mod machine;
mod session;

pub use extract::{Answer, parse_answer, parse_city, parse_days, parse_preferences};
pub use machine::{ConversationState, SubmitOutcome, Turn, WizardMachine};
pub use session::WizardSession;
