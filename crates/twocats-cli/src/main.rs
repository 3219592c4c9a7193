use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twocats_core::{Page, SiteConfig};

mod commands;

#[derive(Parser)]
#[command(name = "twocats")]
#[command(author, version, about = "Interaction runtime for the 2cats site")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/twocats/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Page manifest in TOML (defaults to the built-in 2cats page)
    #[arg(short = 'p', long = "page", global = true)]
    page: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview the page in the terminal
    Run,
    /// Validate contact form values
    Validate {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        service: String,
        #[arg(long, default_value = "")]
        message: String,
        /// Read the values from a TOML file instead
        #[arg(short = 'f', long, conflicts_with_all = ["name", "email", "service", "message"])]
        file: Option<PathBuf>,
    },
    /// Replay a scenario of timed events and report what happened
    Simulate {
        /// Scenario file in TOML
        scenario: PathBuf,
        /// Print the final page view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the values a stat counter shows
    Counter {
        /// Stat text such as "150+"
        stat: String,
        #[arg(long)]
        duration_ms: Option<u64>,
        #[arg(long)]
        tick_ms: Option<u64>,
    },
    /// Show the config file location and effective settings
    Config,
}

impl Commands {
    fn is_tui(command: &Option<Commands>) -> bool {
        matches!(command, Some(Commands::Run) | None)
    }
}

fn init_logging(config: &SiteConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        // The terminal belongs to the preview; logs go next to the data
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => SiteConfig::load_from(path)?,
        None => SiteConfig::load()?,
    };

    init_logging(&config, Commands::is_tui(&cli.command))?;

    let page = match &cli.page {
        Some(path) => {
            Page::load(path).with_context(|| format!("loading page manifest {}", path.display()))?
        }
        None => Page::two_cats(),
    };

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, page).await,
        Some(Commands::Validate {
            name,
            email,
            service,
            message,
            file,
        }) => {
            let values = match file {
                Some(path) => commands::validate::load_values(&path).await?,
                None => twocats_core::form::FieldValues {
                    name,
                    email,
                    service,
                    message,
                },
            };
            commands::validate::run(&values)
        }
        Some(Commands::Simulate { scenario, json }) => {
            commands::simulate::run(config, page, &scenario, json).await
        }
        Some(Commands::Counter {
            stat,
            duration_ms,
            tick_ms,
        }) => commands::counter::run(&config, &stat, duration_ms, tick_ms),
        Some(Commands::Config) => commands::config::run(&config, cli.config.as_deref()),
    }
}
