//! Sentinel Control - disaster monitoring console
//!
//! Runs the interactive TUI by default. `snapshot` prints one section and
//! exits; `dispatch` runs a single action; `config` shows the active or
//! default configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sentinel_shared::action::Action;
use sentinel_shared::dispatcher::Dispatcher;
use sentinel_shared::render::render_detail;
use sentinel_shared::selection::SelectionController;
use sentinel_shared::services::SimulatedServices;
use sentinel_shared::{seed, EntityStore};
use sentinelctl::app::Section;
use sentinelctl::config::{ConfigSource, SentinelConfig};
use sentinelctl::logging::{self, LogTarget};
use sentinelctl::{snapshot, tui};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "sentinelctl")]
#[command(about = "Sentinel - disaster monitoring and response console", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/sentinel/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Simulate unreachable response services
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive console (default)
    Tui,

    /// Print one section of the sample data set and exit
    Snapshot {
        /// dashboard, alerts, reports, teams or guidelines
        #[arg(long, default_value = "dashboard")]
        section: Section,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        #[arg(long)]
        no_color: bool,
    },

    /// Run one action against the sample data set and print the outcome
    Dispatch {
        /// Action identifier, e.g. verify-report or deploy-response
        action: String,

        /// Entity id, or bulletin name for `bulletin`
        target: String,
    },

    /// Show configuration
    Config {
        /// Print built-in defaults instead of the active file
        #[arg(long)]
        print_default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, source) = SentinelConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let log_path = logging::init(&config.log, LogTarget::File)?;
            if source == ConfigSource::Defaults {
                warn!("no config file found, using built-in defaults");
            }
            info!(%source, log = ?log_path, version = VERSION, "configuration loaded");
            let services = if cli.offline {
                SimulatedServices::offline()
            } else {
                SimulatedServices::new()
            };
            tui::run(config, services).await
        }
        Commands::Snapshot {
            section,
            json,
            no_color,
        } => {
            logging::init(&config.log, LogTarget::Stderr)?;
            let store = EntityStore::from_seed(seed::sample_data());
            let output = if json {
                snapshot::render_json(&store, section)?
            } else {
                let color = !no_color && std::io::stdout().is_terminal();
                snapshot::render_text(&store, section, color)
            };
            println!("{}", output);
            Ok(())
        }
        Commands::Dispatch { action, target } => {
            logging::init(&config.log, LogTarget::Stderr)?;
            let action = Action::decode(&action, &target)?;
            let services = if cli.offline {
                SimulatedServices::offline()
            } else {
                SimulatedServices::new()
            };
            let mut store = EntityStore::from_seed(seed::sample_data());
            let mut selection = SelectionController::new();
            let mut dispatcher = Dispatcher::new(services, config.dispatch.clone());

            let outcome = dispatcher.dispatch(&mut store, &mut selection, action);
            println!("{}", serde_json::to_string_pretty(&outcome.notice)?);
            for changed in &outcome.changed {
                let entity = store.get_by_id(changed.kind, &changed.id)?;
                println!("{}", serde_json::to_string_pretty(&render_detail(&entity))?);
            }
            match outcome.error {
                Some(err) => Err(err.into()),
                None => Ok(()),
            }
        }
        Commands::Config { print_default } => {
            if print_default {
                print!("{}", SentinelConfig::default().to_toml()?);
            } else {
                println!("# source: {}", source);
                print!("{}", config.to_toml()?);
            }
            Ok(())
        }
    }
}
