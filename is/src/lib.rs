//! ItineraryStore - file-backed cache for generated itineraries
//!
//! Mirrors the two-tier storage contract of the planning client: a session
//! copy that is cleared between planning sessions and a durable copy that
//! always holds the most recent itinerary.
//!
//! # Layout
//!
//! ```text
//! {store_path}/
//! ├── itinerary_data.json        # session copy
//! └── last_itinerary_data.json   # durable copy
//! ```
//!
//! # Example
//!
//! ```ignore
//! use itinerarystore::ItineraryStore;
//!
//! let store = ItineraryStore::open("~/.local/share/tripplanner")?;
//! store.save(&normalized)?;
//! let cached = store.load_session()?.or(store.load_last()?);
//! ```

pub mod cli;
pub mod config;
mod store;

pub use store::{ItineraryStore, StoreError};

/// Filename of the session copy
pub const SESSION_FILE: &str = "itinerary_data.json";

/// Filename of the durable copy
pub const LAST_FILE: &str = "last_itinerary_data.json";
