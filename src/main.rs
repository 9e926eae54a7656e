//! input-card - reference host binary
//!
//! Loads card setup data, stands up a minimal automation platform task, and
//! embeds the card in the bundled TUI host.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use input_card::config::{CardConfig, CardOptions};
use input_card::core::{ChannelBridge, FireEventRequest, InputCard};
use input_card::frontend::TuiHost;
use input_card::registry::CardRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "input-card")]
#[command(about = "Free-text / single-select input card for smart-home dashboards", long_about = None)]
struct Cli {
    /// Card options file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a card options file without starting the TUI
    ValidateConfig {
        /// Options file to validate
        #[arg(value_name = "FILE")]
        config: PathBuf,
    },

    /// List the card types this binary registers with the picker
    ListCards,
}

fn main() -> Result<()> {
    // Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    // TUI apps can't log to stdout, so we write to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("input-card.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Commands::ValidateConfig { config } => return validate_config(&config),
            Commands::ListCards => return list_cards(),
        }
    }

    let options = load_options(cli.config.as_deref())?;
    run_tui(options)
}

/// Resolve card options: explicit file, then the default location, then a
/// built-in demo card
fn load_options(path: Option<&Path>) -> Result<CardOptions> {
    if let Some(path) = path {
        return CardOptions::load_from_file(path);
    }

    if let Some(default) = CardOptions::default_path() {
        if default.exists() {
            tracing::info!("Loading card options from {}", default.display());
            return CardOptions::load_from_file(&default);
        }
    }

    Ok(CardOptions {
        title: Some("Send to automation".to_string()),
        max_length: Some(120),
        ..Default::default()
    })
}

fn validate_config(path: &Path) -> Result<()> {
    println!("Validating card options: {}", path.display());

    let options = CardOptions::load_from_file(path)?;
    match CardConfig::from_options(Some(options)) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!(
                "  mode: {}",
                if config.use_text_input { "text" } else { "select" }
            );
            if !config.use_text_input {
                println!("  {} select option(s)", config.select_options.len());
            }
            println!("  event: {}", config.event_name);
            println!("  max length: {}", config.max_length);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            bail!("card options file is invalid")
        }
    }
}

fn list_cards() -> Result<()> {
    let registry = CardRegistry::with_builtin();
    for meta in registry.list() {
        println!("{} - {}", meta.type_id, meta.name);
        println!("  {}", meta.description);
        println!("  preview: {}", meta.preview);
    }
    Ok(())
}

/// Run the TUI host
fn run_tui(options: CardOptions) -> Result<()> {
    // Use tokio runtime for the platform task
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(options))
}

/// Async TUI main loop with a stand-in automation platform
async fn async_run_tui(options: CardOptions) -> Result<()> {
    use tokio::sync::mpsc;

    // Card -> platform events, platform -> host receipts
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<FireEventRequest>();
    let (receipt_tx, receipt_rx) = mpsc::unbounded_channel::<String>();

    // Stand-in for the backing automation platform: consume fired events,
    // log them, acknowledge to the host's on-screen event log
    tokio::spawn(async move {
        while let Some(request) = event_rx.recv().await {
            tracing::info!(
                event_type = %request.event_type,
                event_data = %request.event_data,
                "event dispatched to platform"
            );
            let receipt = format!("{}: {}", request.event_type, request.event_data);
            if receipt_tx.send(receipt).is_err() {
                break;
            }
        }
    });

    let bridge = Arc::new(ChannelBridge::new(event_tx));
    let mut card = InputCard::new(bridge);
    card.set_config(Some(options))
        .context("invalid card configuration")?;

    let mut host = TuiHost::new(card, receipt_rx)?;
    host.run()
}
