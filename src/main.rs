// Synthesia Kontrol
// Lights the keys of Komplete Kontrol keyboards from Synthesia's MIDI output

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::SessionOptions;
use synthesia_kontrol::config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load config
    let config_path = cli.config.unwrap_or_else(AppConfig::default_path);
    info!("Loading config from {:?}", config_path);
    let config = AppConfig::load(&config_path)?;

    let options = SessionOptions {
        registry: config.build_registry()?,
        keyboard: cli.keyboard.or(config.keyboard),
        midi_port: cli.port.unwrap_or(config.midi_port),
        monitor: cli.monitor || config.monitor,
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(&options),
        Commands::Ports => commands::utility::ports(&options.midi_port),
        Commands::Devices => commands::utility::devices(&options.registry),
        Commands::Profiles => commands::utility::profiles(&options.registry),
        Commands::Sweep { delay_ms } => commands::sweep::sweep(&options, delay_ms),
    }
}
