use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use tracing::debug;
use weather_core::{
    CityQuery, Config, DisplayController, Key, ProviderId, UiEvent,
    calendar::SystemClock,
    config::DEFAULT_CITY,
    provider::{self, WeatherProvider},
};

use crate::terminal::{self, TerminalAlert};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup widget")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args, Default)]
pub struct ProviderArgs {
    /// Provider short name, "mock" or "openweather". Defaults to the configured one.
    #[arg(long)]
    provider: Option<String>,

    /// Seed for the mock provider, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    ///
    /// `configure mock` makes the mock provider the default again.
    Configure {
        /// Provider short name, e.g. "openweather".
        provider: String,
    },

    /// Show weather for a city once and exit.
    Show {
        /// City name, e.g. "New York".
        city: String,

        /// Print the rendered view as JSON.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Start with the default city and keep prompting for new ones (default).
    Interactive {
        #[command(flatten)]
        provider: ProviderArgs,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command =
            self.command.unwrap_or(Command::Interactive { provider: ProviderArgs::default() });

        match command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { city, json, provider } => show(&city, json, &provider).await,
            Command::Interactive { provider } => interactive(&provider).await,
        }
    }
}

fn build_provider(
    args: &ProviderArgs,
    config: &mut Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    match args.provider.as_deref() {
        Some(id) => provider::provider_from_config(ProviderId::try_from(id)?, config),
        None => provider::default_provider_from_config(config),
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = if id.requires_api_key() {
        let key = Password::new(&format!("API key for {id}:"))
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;
        Some(key)
    } else {
        None
    };
    apply_configuration(&mut config, id, api_key);

    let path = config.save()?;
    println!("Saved {id} configuration to {}", path.display());
    Ok(())
}

/// Keyed providers only become the default when none is set; `mock` always does.
fn apply_configuration(config: &mut Config, id: ProviderId, api_key: Option<String>) {
    match api_key {
        Some(key) => config.upsert_provider_api_key(id, key.trim().to_string()),
        None => config.set_default_provider(id),
    }
}

async fn show(city: &str, json: bool, args: &ProviderArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let provider = build_provider(args, &mut config)?;
    let city = CityQuery::parse(city)?;

    let mut controller =
        DisplayController::new(provider, TerminalAlert, Box::new(SystemClock), city);
    controller.initialize().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(controller.view())?);
    } else {
        print!("{}", terminal::paint(controller.view()));
    }

    Ok(())
}

async fn interactive(args: &ProviderArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let provider = build_provider(args, &mut config)?;
    let default_city = CityQuery::parse(&config.default_city)
        .or_else(|_| CityQuery::parse(DEFAULT_CITY))?;

    let mut controller =
        DisplayController::new(provider, TerminalAlert, Box::new(SystemClock), default_city);

    // Failures are already shown to the user; the widget stays usable.
    if let Err(err) = controller.initialize().await {
        debug!(error = %err, "initial lookup failed");
    }
    print!("{}", terminal::paint(controller.view()));

    loop {
        let input = Text::new("City:").with_help_message("Enter to search, Esc to quit").prompt();

        let input = match input {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        controller.view_mut().set_search_input(input);
        match controller.dispatch(UiEvent::KeyPressed(Key::Enter)).await {
            Err(err) if err.is_validation() => continue,
            Err(err) => debug!(error = %err, "lookup failed"),
            Ok(()) => {}
        }

        println!();
        print!("{}", terminal::paint(controller.view()));
    }

    Ok(())
}
