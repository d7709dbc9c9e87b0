use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use patron_tally::api::{PatronApi, create_api};
use patron_tally::app::App;
use patron_tally::dispatch::{Dispatcher, Intent};
use patron_tally::logging;
use patron_tally::models::{Patron, PatronId, SaturationBand, format_number};
use patron_tally::storage::{Config, ensure_directories, load_config};
use patron_tally::tally::{Effect, Tally};
use patron_tally::ui::Theme;

#[derive(Parser)]
#[command(name = "patron-tally")]
#[command(about = "Patron roster and alcohol saturation tally", long_about = None)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/patron-tally/patron-tally.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the tally service, overriding the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the patron roster
    List {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a patron
    Add {
        #[arg(long)]
        name: String,

        /// Body mass as typed; text that is not a number is sent as NaN
        #[arg(long)]
        body_mass: String,
    },

    /// Delete a patron
    Delete { id: PatronId },

    /// Record a drink for a patron, then refresh their saturation level
    Drink { patron_id: PatronId, drink_id: String },

    /// Refresh one patron's saturation level
    Saturation { patron_id: PatronId },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.general.base_url = base_url;
    }

    match cli.command {
        Some(command) => {
            // Headless: the terminal is ours, log to stderr
            env_logger::init();
            let api = create_api(&config.general.base_url);
            run_headless(command, api)
        }
        None => run_tui(&config),
    }
}

/// Launch the interactive roster
fn run_tui(config: &Config) -> Result<()> {
    let (data_dir, _) = ensure_directories()?;
    logging::init_file_logger(&data_dir.join("patron-tally.log"), &config.general.log_level)?;
    log::info!("Starting patron-tally TUI");

    let theme = Theme::load(&config.ui.theme).unwrap_or_else(|e| {
        log::warn!("{}, falling back to mocha", e);
        Theme::default()
    });

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let api = create_api(&config.general.base_url);
    let mut app = App::new(Dispatcher::new(api, runtime.handle().clone()), theme);
    app.start();

    let mut terminal = ratatui::init();
    let result = run_event_loop(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.ui.tick_rate_ms),
    );
    ratatui::restore();

    log::info!("Exiting patron-tally TUI");
    result
}

fn run_event_loop(terminal: &mut DefaultTerminal, app: &mut App, tick_rate: Duration) -> Result<()> {
    while !app.should_quit {
        app.poll_completions();

        terminal
            .draw(|frame| app.draw(frame))
            .context("Failed to draw frame")?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Ignore release/repeat events reported by some terminals
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }
    }
    Ok(())
}

/// Intent a headless command runs, if any beyond the roster fetch
fn command_intent(command: &Commands) -> Option<Intent> {
    match command {
        Commands::List { .. } => None,
        Commands::Add { name, body_mass } => Some(Intent::Create {
            name: name.clone(),
            body_mass_text: body_mass.clone(),
        }),
        Commands::Delete { id } => Some(Intent::Remove(*id)),
        Commands::Drink {
            patron_id,
            drink_id,
        } => Some(Intent::RecordDrink {
            patron_id: *patron_id,
            drink_id: drink_id.clone(),
        }),
        Commands::Saturation { patron_id } => Some(Intent::RefreshSaturation(*patron_id)),
    }
}

/// Patron whose row is printed after the command, if any
fn shown_patron(command: &Commands) -> Option<PatronId> {
    match command {
        Commands::Drink { patron_id, .. } | Commands::Saturation { patron_id } => Some(*patron_id),
        _ => None,
    }
}

/// Run one command to completion and return the resulting state.
///
/// `list`, `drink` and `saturation` fetch the roster first. For the latter two
/// the fetch only serves the printout, so its failure is logged and does not
/// count against the command.
fn execute(command: &Commands, api: Arc<dyn PatronApi>) -> Result<Tally> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let mut dispatcher = Dispatcher::new(api, runtime.handle().clone());
    let mut tally = Tally::new();

    let is_list = matches!(command, Commands::List { .. });
    if is_list || shown_patron(command).is_some() {
        drive(&mut dispatcher, &mut tally, Intent::FetchAll);

        if !is_list {
            if let Some(message) = tally.notifications.error() {
                log::warn!("Roster lookup failed, continuing: {}", message);
                tally.notifications.dismiss_error();
            }
        }
    }

    if let Some(intent) = command_intent(command) {
        drive(&mut dispatcher, &mut tally, intent);
    }

    Ok(tally)
}

/// Run one command against the service and print the outcome.
/// Fails when the command itself left an error message.
fn run_headless(command: Commands, api: Arc<dyn PatronApi>) -> Result<()> {
    let tally = execute(&command, api)?;

    match command {
        Commands::List { json: true } => {
            let out = serde_json::to_string_pretty(tally.roster.patrons())
                .context("Failed to serialize roster")?;
            println!("{}", out);
        }
        Commands::List { json: false } => print_roster(tally.roster.patrons()),
        _ => {
            if let Some(patron) = shown_patron(&command).and_then(|id| tally.roster.get(id)) {
                print_roster(std::slice::from_ref(patron));
            }
        }
    }

    if let Some(message) = tally.notifications.success() {
        println!("{}", message);
    }
    if let Some(message) = tally.notifications.error() {
        bail!("{}", message);
    }
    Ok(())
}

/// Dispatch `intent` and apply completions until nothing is in flight,
/// following chained intents
fn drive(dispatcher: &mut Dispatcher, tally: &mut Tally, intent: Intent) {
    dispatcher.dispatch(intent);
    while let Some(completion) = dispatcher.wait() {
        if let Effect::Dispatch(next) = tally.apply(completion) {
            dispatcher.dispatch(next);
        }
    }
}

fn print_roster(patrons: &[Patron]) {
    println!(
        "{:>5}  {:<24} {:>10} {:>10}  {}",
        "ID", "NAME", "BODY MASS", "LEVEL", "BAND"
    );
    println!("{}", "=".repeat(60));

    for patron in patrons {
        println!(
            "{:>5}  {:<24} {:>10} {:>10}  {}",
            patron.id,
            patron.name,
            format_number(patron.body_mass),
            format_number(patron.alcohol_saturation_level),
            SaturationBand::for_level(patron.alcohol_saturation_level),
        );
    }

    if patrons.is_empty() {
        println!("(empty - no patrons yet)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use patron_tally::api::ApiError;
    use patron_tally::models::{NewPatron, PatronDefaults, SaturationReading};
    use patron_tally::tally::{FETCH_FAILED, PATRON_ADDED, saturation_fetched};
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Service whose roster listing always fails while everything else works
    #[derive(Default)]
    struct ListFailsApi {
        list_calls: AtomicUsize,
    }

    #[async_trait]
    impl PatronApi for ListFailsApi {
        async fn list_patrons(&self) -> Result<Vec<Patron>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        }

        async fn create_patron(&self, patron: &NewPatron) -> Result<Patron, ApiError> {
            Ok(Patron {
                id: 1,
                name: patron.name.clone(),
                body_mass: patron.body_mass,
                alcohol_saturation_level: patron.alcohol_saturation_level,
            })
        }

        async fn delete_patron(&self, _id: PatronId) -> Result<(), ApiError> {
            Ok(())
        }

        async fn add_drink(&self, _patron_id: PatronId, _drink_id: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn saturation_level(&self, _patron_id: PatronId) -> Result<SaturationReading, ApiError> {
            Ok(SaturationReading {
                alcohol_saturation_level: 0.4,
            })
        }

        async fn default_values(&self) -> Result<PatronDefaults, ApiError> {
            Err(ApiError::Status(StatusCode::NOT_FOUND))
        }

        fn name(&self) -> &'static str {
            "list-fails"
        }
    }

    fn add_john() -> Commands {
        Commands::Add {
            name: "John Doe".to_string(),
            body_mass: "80".to_string(),
        }
    }

    #[test]
    fn test_add_succeeds_without_roster_fetch() {
        let api = Arc::new(ListFailsApi::default());

        let tally = execute(&add_john(), api.clone()).unwrap();

        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(tally.notifications.success(), Some(PATRON_ADDED));
        assert_eq!(tally.notifications.error(), None);
        assert!(run_headless(add_john(), api).is_ok());
    }

    #[test]
    fn test_failed_lookup_does_not_fail_drink() {
        let api = Arc::new(ListFailsApi::default());
        let command = Commands::Drink {
            patron_id: 1,
            drink_id: "5".to_string(),
        };

        let tally = execute(&command, api.clone()).unwrap();

        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(tally.notifications.error(), None);
        assert_eq!(
            tally.notifications.success(),
            Some(saturation_fetched(1).as_str())
        );
    }

    #[test]
    fn test_failed_list_is_reported() {
        let api = Arc::new(ListFailsApi::default());

        let tally = execute(&Commands::List { json: false }, api.clone()).unwrap();
        assert_eq!(tally.notifications.error(), Some(FETCH_FAILED));

        let err = run_headless(Commands::List { json: true }, api).unwrap_err();
        assert_eq!(err.to_string(), FETCH_FAILED);
    }
}
