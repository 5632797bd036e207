//! Planning backend client
//!
//! The backend is an opaque collaborator reached over HTTP: one POST per
//! generation attempt, with transient failures retried and domain failures
//! classified for the UI.

mod client;
mod error;
mod report;

pub use client::{HttpPlanner, PlannerApi};
pub use error::PlannerError;
pub use report::{ErrorReport, send_report};
