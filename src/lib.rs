//! rfocus library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use store::log::ActivityLog;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, journal: &ActivityLog) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, journal),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Run { .. } => cli::commands::run::handle(&cli.command, cfg, journal),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, journal),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    logging::init(!cli.test);

    let mut cfg = Config::load()?;
    if let Some(custom) = &cli.stats {
        cfg.stats_file = custom.clone();
    }

    let journal = if cli.test {
        ActivityLog::disabled()
    } else {
        ActivityLog::new(Config::activity_file())
    };

    tracing::debug!(command = ?std::env::args().nth(1), "dispatching");
    dispatch(&cli, &cfg, &journal)
}
