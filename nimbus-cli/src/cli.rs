use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use nimbus_core::{
    Config, LoadOutcome, Theme, ThemeStore, WeatherApp, provider_from_config,
    locate::{FixedLocator, IpLocator, Locator},
    provider::weatherapi::WeatherApiProvider,
    suggest::{MIN_QUERY_CHARS, SuggestionFetcher, SuggestionUpdate},
};
use std::{sync::Arc, time::Duration};

use crate::terminal::TerminalDisplay;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "nimbus", version, about = "Weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key.
    Configure {
        /// Key to store; prompted for when absent.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show weather for a location, or for where you are when omitted.
    Show {
        /// Place name or "lat,lon".
        location: Option<String>,
    },

    /// Show weather for your current position; fails instead of falling back.
    Here,

    /// List locations matching a partial name.
    Search {
        query: String,

        /// Pick one of the matches interactively and show its weather.
        #[arg(long)]
        pick: bool,
    },

    /// Print or change the light/dark preference.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

type App = WeatherApp<WeatherApiProvider, TerminalDisplay>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Show { location } => {
                let (app, locator) = build_app()?;
                let outcome = match location {
                    Some(location) => app.search(&location).await,
                    None => app.load_default(&*locator).await,
                };
                finish(app, outcome)
            }
            Command::Here => {
                let (app, locator) = build_app()?;
                match app.locate_current(&*locator).await {
                    Ok(outcome) => finish(app, outcome),
                    Err(err) => Err(anyhow!(err)),
                }
            }
            Command::Search { query, pick } => search(&query, pick).await,
            Command::Theme { action } => theme(action),
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => inquire::Password::new("WeatherAPI.com API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };

    if api_key.trim().is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    cfg.set_api_key(api_key.trim().to_string());
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_app() -> anyhow::Result<(App, Box<dyn Locator>)> {
    let cfg = Config::load()?;
    tracing::debug!(base_url = cfg.base_url(), "loaded configuration");
    let provider = Arc::new(provider_from_config(&cfg)?);
    let theme = ThemeStore::open_default()?.get();

    let locator: Box<dyn Locator> = match cfg.coordinates() {
        Some(coords) => Box::new(FixedLocator(coords)),
        None => Box::new(IpLocator::new((*provider).clone())),
    };

    let app = WeatherApp::new(provider, TerminalDisplay::new(theme))
        .with_fallback_location(cfg.default_location())
        .with_geolocation_timeout(cfg.geolocation_timeout())
        // One-shot queries have no keystrokes to wait out.
        .with_suggestion_fetcher(SuggestionFetcher::new(Duration::ZERO));

    Ok((app, locator))
}

fn finish(app: App, outcome: LoadOutcome) -> anyhow::Result<()> {
    app.into_display().print();

    match outcome {
        LoadOutcome::Failed(err) => Err(anyhow!(err).context("Failed to load weather")),
        LoadOutcome::Ignored => Err(anyhow!("Location must not be empty")),
        LoadOutcome::Rendered(_) | LoadOutcome::Stale => Ok(()),
    }
}

async fn search(query: &str, pick: bool) -> anyhow::Result<()> {
    let (app, _) = build_app()?;

    let list = match app.on_search_input(query).await {
        SuggestionUpdate::Show(list) => list,
        SuggestionUpdate::Hide if query.chars().count() < MIN_QUERY_CHARS => {
            println!("Type at least {MIN_QUERY_CHARS} characters to search.");
            return Ok(());
        }
        SuggestionUpdate::Hide => {
            println!("No matching locations.");
            return Ok(());
        }
        SuggestionUpdate::Unchanged => {
            return Err(anyhow!("Could not fetch suggestions"));
        }
    };

    if !pick {
        for s in &list {
            println!("{}", s.label());
        }
        return Ok(());
    }

    let labels: Vec<String> = list.iter().map(|s| s.label()).collect();
    let choice = inquire::Select::new("Location:", labels.clone())
        .prompt()
        .context("No location selected")?;
    let index = labels
        .iter()
        .position(|l| *l == choice)
        .ok_or_else(|| anyhow!("Unknown selection"))?;

    let outcome = app.select_suggestion(&list[index]).await;
    finish(app, outcome)
}

fn theme(action: Option<ThemeAction>) -> anyhow::Result<()> {
    let store = ThemeStore::open_default()?;

    let theme = match action {
        None => store.get(),
        Some(ThemeAction::Toggle) => store.toggle()?,
        Some(ThemeAction::Light) => {
            store.set(Theme::Light)?;
            Theme::Light
        }
        Some(ThemeAction::Dark) => {
            store.set(Theme::Dark)?;
            Theme::Dark
        }
    };

    println!("{} {theme}", theme.toggle_icon().glyph());
    Ok(())
}
