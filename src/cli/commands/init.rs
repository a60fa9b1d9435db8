use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::log::ActivityLog;
use crate::ui::messages::success;
use tracing::info;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - an empty statistics file
pub fn handle(cli: &Cli, journal: &ActivityLog) -> AppResult<()> {
    let stats_path = Config::init_all(cli.stats.clone(), cli.test)?;
    let path = Config::config_file();

    println!("⚙️  Initializing rfocus…");
    println!("📄 Config file : {}", path.display());
    println!("📊 Stats file  : {}", stats_path.display());

    info!(config = %path.display(), stats = %stats_path.display(), "initialized");
    journal.record(
        "init",
        &stats_path.to_string_lossy(),
        &format!("Configuration initialized at {}", path.display()),
    );

    success("rfocus initialization completed!");
    Ok(())
}
