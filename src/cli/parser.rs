use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rfocus
/// Focus timer with random alert chimes, enforced breaks and daily statistics
#[derive(Parser)]
#[command(
    name = "rfocus",
    version = env!("CARGO_PKG_VERSION"),
    about = "A focus timer: random alert chimes while you work, an enforced break after each cycle, and daily statistics",
    long_about = None
)]
pub struct Cli {
    /// Override statistics file path (useful for tests or a custom file)
    #[arg(global = true, long = "stats", value_name = "FILE")]
    pub stats: Option<String>,

    /// Run in test mode (no config file update, no file logging)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the statistics file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Start the interactive focus timer
    Run {
        #[arg(long = "work", value_name = "MIN", help = "Work cycle length in minutes")]
        work: Option<u64>,

        #[arg(long = "rest", value_name = "MIN", help = "Break length in minutes")]
        rest: Option<u64>,

        #[arg(
            long = "min-interval",
            value_name = "SEC",
            help = "Shortest gap between two alerts, in seconds"
        )]
        min_interval: Option<u64>,

        #[arg(
            long = "max-interval",
            value_name = "SEC",
            help = "Longest gap between two alerts, in seconds"
        )]
        max_interval: Option<u64>,

        #[arg(long = "mute", help = "Do not play alert sounds")]
        mute: bool,
    },

    /// Show the recorded daily statistics
    Stats {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "today", help = "Show only today's record")]
        today: bool,

        #[arg(long = "charts", help = "Also draw the text charts")]
        charts: bool,
    },

    /// Export daily statistics
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the activity journal
    Log {
        #[arg(long = "print", help = "Print the activity journal")]
        print: bool,

        #[arg(long = "lines", value_name = "N", help = "Only the last N entries")]
        lines: Option<usize>,
    },
}
