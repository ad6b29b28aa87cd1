use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::{debug, info};
use weatherbot_core::{
    City, CityId, Config, Mode, Notifier, OpenWeatherClient, Outcome, Request, StdoutNotifier,
    TelegramNotifier,
    report::{self, DEFAULT_FORECAST_ENTRIES},
};

const DEFAULT_CITY: &str = "MexicoCity";
const DEFAULT_REQUEST: &str = "WF";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weatherbot",
    version,
    about = "Sends the current weather and a short forecast to a Telegram chat"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub report: ReportArgs,

    /// Log debug output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// City name (Madrid, MexicoCity, NewYork, Toronto) or OpenWeather city id.
    #[arg(long = "city-name", alias = "cityName", value_name = "CITY")]
    pub city_name: Option<String>,

    /// W = current weather, F = forecast, WF = both.
    #[arg(long, value_name = "MODE")]
    pub request: Option<String>,

    /// Number of forecast slots to include (at least 1).
    #[arg(long, default_value_t = DEFAULT_FORECAST_ENTRIES)]
    pub forecast_entries: NonZeroUsize,

    /// Print the message instead of sending it to Telegram.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store credentials and defaults in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => send_report(self.report).await,
        }
    }
}

async fn send_report(args: ReportArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    config.apply_env();

    let city_value = args
        .city_name
        .or_else(|| config.city.clone())
        .unwrap_or_else(|| DEFAULT_CITY.to_string());
    let mode_value = args
        .request
        .or_else(|| config.request.clone())
        .unwrap_or_else(|| DEFAULT_REQUEST.to_string());

    let city = CityId::resolve(&city_value)?;
    let mode = Mode::parse(&mode_value);
    debug!(city = %city_value, request = %mode_value, "resolved options");

    let (client, notifier): (OpenWeatherClient, Box<dyn Notifier>) = if args.dry_run {
        (OpenWeatherClient::new(config.api_key()?), Box::new(StdoutNotifier))
    } else {
        let settings = config.settings()?;
        (
            OpenWeatherClient::new(settings.api_key),
            Box::new(TelegramNotifier::new(settings.bot_token, settings.chat_id)),
        )
    };

    let request = Request {
        city,
        mode,
        forecast_entries: args.forecast_entries,
    };

    match report::run(&client, notifier.as_ref(), &request, &Local::now()).await? {
        Outcome::Sent(_) => {}
        Outcome::Skipped => info!(request = %mode_value, "no report for this request mode"),
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read OpenWeather API key")?;

    let bot_token = Password::new("Telegram bot token:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read Telegram bot token")?;

    let chat_id = Text::new("Telegram chat id:")
        .with_initial_value(config.telegram.chat_id.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read Telegram chat id")?;

    let current_city = config.city.as_deref().unwrap_or(DEFAULT_CITY);
    let cursor = City::all()
        .iter()
        .position(|c| c.as_str().eq_ignore_ascii_case(current_city))
        .unwrap_or(0);
    let city = Select::new("Default city:", City::all().to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read default city")?;

    // Blank answers keep what was stored before.
    if !api_key.trim().is_empty() {
        config.openweather.api_key = Some(api_key.trim().to_string());
    }
    if !bot_token.trim().is_empty() {
        config.telegram.bot_token = Some(bot_token.trim().to_string());
    }
    if !chat_id.trim().is_empty() {
        config.telegram.chat_id = Some(chat_id.trim().to_string());
    }
    config.city = Some(city.as_str().to_string());

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
