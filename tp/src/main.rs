//! TripPlanner - conversational travel itinerary client
//!
//! CLI entry point: chat wizard by default, plus direct plan / result /
//! clear commands.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use tripplanner::cli::{Cli, Command};
use tripplanner::config::Config;
use tripplanner::domain::{Preference, TravelRequest};
use tripplanner::generate::Generator;
use tripplanner::render::render_itinerary;
use tripplanner::wizard::WizardSession;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = if let Some(s) = level_str {
        match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        }
    } else {
        tracing::Level::INFO
    };

    let log_file =
        fs::File::create(log_dir.join("tripplanner.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref())
        .context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("TripPlanner loaded config: backend={}", config.backend.base_url);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        // Default: launch the conversation
        None => cmd_chat(&config, None).await,
        Some(Command::Chat { message }) => cmd_chat(&config, message).await,
        Some(Command::Plan {
            city,
            province,
            days,
            prefs,
            date,
            json,
        }) => cmd_plan(&config, city, province, days, prefs, date, json).await,
        Some(Command::Result { json }) => cmd_result(&config, json),
        Some(Command::Clear) => cmd_clear(&config),
    }
}

/// Run the interactive planning conversation
async fn cmd_chat(config: &Config, message: Option<String>) -> Result<()> {
    debug!(?message, "cmd_chat: called");
    let generator = Generator::from_config(config)?;
    WizardSession::new(generator).run(message).await
}

/// Generate an itinerary directly from CLI arguments
async fn cmd_plan(
    config: &Config,
    city: String,
    province: Option<String>,
    days: u32,
    prefs: Vec<String>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    debug!(%city, days, ?prefs, "cmd_plan: called");

    let preferences = prefs
        .iter()
        .map(|p| p.parse::<Preference>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| eyre::eyre!(e))?;

    let travel_date = match date {
        Some(d) => chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .context("Invalid --date, expected YYYY-MM-DD")?,
        None => chrono::Local::now().date_naive(),
    };

    let request = TravelRequest {
        city,
        province: province.unwrap_or_default(),
        days,
        preferences,
        travel_date,
    };
    request.validate().map_err(|e| eyre::eyre!(e))?;

    let generator = Generator::from_config(config)?;
    let (_, normalized) = generator.generate(&request, !json).await;

    match normalized {
        Some(value) if json => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Some(_) => Ok(()),
        None => std::process::exit(1),
    }
}

/// Show the most recently generated itinerary
fn cmd_result(config: &Config, json: bool) -> Result<()> {
    debug!(json, "cmd_result: called");
    let store = itinerarystore::ItineraryStore::open(&config.storage.store_path)?;

    match store.load()? {
        Some(value) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", render_itinerary(&value));
            }
            Ok(())
        }
        None => {
            println!("No itinerary yet. Run {} to plan a trip.", "tp chat".yellow());
            Ok(())
        }
    }
}

/// Clear the current session itinerary
fn cmd_clear(config: &Config) -> Result<()> {
    debug!("cmd_clear: called");
    let store = itinerarystore::ItineraryStore::open(&config.storage.store_path)?;
    store.clear()?;
    println!("{} Session itinerary cleared", "✓".green());
    Ok(())
}
