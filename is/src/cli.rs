//! CLI argument parsing for itinerarystore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "is")]
#[command(author, version, about = "File-backed cache for generated itineraries", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the cached session itinerary as JSON
    Show,

    /// Print the most recent itinerary (durable copy) as JSON
    Last,

    /// Print the store file paths
    Path,

    /// Clear the session itinerary (keeps the durable copy)
    Clear,
}
