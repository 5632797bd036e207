//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TripPlanner - conversational travel itinerary client
#[derive(Parser)]
#[command(
    name = "tripplanner",
    about = "Plan travel itineraries through a guided conversation",
    version,
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to chat)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive planning conversation
    Chat {
        /// Optional first message, fed to the wizard before prompting
        message: Option<String>,
    },

    /// Generate an itinerary directly, without the conversation
    Plan {
        /// Destination city
        #[arg(short = 'C', long)]
        city: String,

        /// Province or region (optional)
        #[arg(short, long)]
        province: Option<String>,

        /// Trip length in days (1-30)
        #[arg(short, long)]
        days: u32,

        /// Comma-separated preferences (nature, culture, food, shopping,
        /// adventure, relax, family, photography)
        #[arg(short = 'P', long, value_delimiter = ',')]
        prefs: Vec<String>,

        /// Travel start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Print the raw itinerary JSON instead of rendered text
        #[arg(long)]
        json: bool,
    },

    /// Show the most recently generated itinerary
    Result {
        /// Print the raw itinerary JSON instead of rendered text
        #[arg(long)]
        json: bool,
    },

    /// Clear the current session itinerary
    Clear,
}
