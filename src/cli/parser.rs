use crate::export::OutputFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for fraudstore
#[derive(Parser)]
#[command(
    name = "fraudstore",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event store for the fraud-review workflow: ingest events, record predictions and dispositions",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the events table
    Init,

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration (password masked)")]
        print_config: bool,

        #[arg(long = "mapping", help = "Print the column mapping in use")]
        mapping: bool,
    },

    /// Database diagnostics
    Db {
        #[arg(long = "info", help = "Show connection settings, schema version and row count")]
        info: bool,

        #[arg(long = "migrate", help = "Create the events table or add missing mapped columns")]
        migrate: bool,
    },

    /// Ingest events from a JSON file (object, array of objects or JSON Lines)
    Add {
        /// Input file, or "-" for stdin
        file: String,
    },

    /// Show events still waiting for a prediction
    Pending {
        #[arg(long, value_enum, help = "Output format (default from config)")]
        format: Option<OutputFormat>,

        #[arg(long = "out", value_name = "FILE", help = "Write to FILE instead of stdout")]
        out: Option<String>,

        #[arg(long, short = 'f', requires = "out", help = "Overwrite FILE without asking")]
        force: bool,
    },

    /// Store a model prediction for an event
    Predict {
        /// Event id
        event_id: i64,

        /// Predicted label
        prediction: String,

        /// Probability of the prediction
        probability: f64,
    },

    /// Dashboard list of events, newest first
    List {
        #[arg(long = "all", help = "Include events that already have a disposition")]
        all: bool,

        #[arg(long, value_enum, help = "Output format (default from config)")]
        format: Option<OutputFormat>,

        #[arg(long = "out", value_name = "FILE", help = "Write to FILE instead of stdout")]
        out: Option<String>,

        #[arg(long, short = 'f', requires = "out", help = "Overwrite FILE without asking")]
        force: bool,
    },

    /// Record a reviewer's disposition for an event
    Dispose {
        /// Event id
        event_id: i64,

        /// Disposition (e.g. fraud, not_fraud)
        disposition: String,
    },
}
