use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Log { print: true, lines } = cmd {
        LogLogic::print_log(&Config::activity_file(), *lines)?;
    }

    Ok(())
}
