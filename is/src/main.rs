use clap::Parser;
use colored::*;
use eyre::{Context, Result};

use itinerarystore::ItineraryStore;
use itinerarystore::cli::{Cli, Command};
use itinerarystore::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let store = ItineraryStore::open(&config.store_path)?;

    match cli.command {
        Command::Show => match store.load_session()? {
            Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            None => println!("No session itinerary cached"),
        },
        Command::Last => match store.load_last()? {
            Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            None => println!("No itinerary cached"),
        },
        Command::Path => {
            println!("Session: {}", store.session_path().display());
            println!("Durable: {}", store.last_path().display());
        }
        Command::Clear => {
            store.clear()?;
            println!("{} Cleared session itinerary", "✓".green());
        }
    }

    Ok(())
}
