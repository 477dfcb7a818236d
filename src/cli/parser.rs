use crate::core::report::ReportPeriod;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rDowntime
#[derive(Parser)]
#[command(
    name = "rdowntime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Relay factory-floor chat messages through a language model into a SQLite downtime ledger",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Add missing fields to the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Classify a single message and relay its summary
    Process {
        /// Message text as written in the chat
        text: String,

        /// Author of the message
        #[arg(long = "author", default_value = "cli")]
        author: String,

        /// Message time (YYYY-MM-DD HH:MM:SS), defaults to now
        #[arg(long = "at")]
        at: Option<String>,
    },

    /// Read messages from stdin, one per line, and relay a summary for each
    Listen {
        /// Author attributed to every message read
        #[arg(long = "author", default_value = "chat")]
        author: String,

        /// Skip the retention sweep normally run at startup
        #[arg(long = "no-purge")]
        no_purge: bool,
    },

    /// Show downtime or error reports
    Report {
        #[arg(value_enum)]
        period: ReportPeriod,
    },

    /// Delete downtime intervals older than the retention period
    Purge {
        #[arg(long = "days", help = "Retention in days (default from config)")]
        days: Option<i64>,
    },
}
