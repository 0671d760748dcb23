//! CLI argument definitions for `campusgraph`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use campus_graph::config::ConfigOverrides;
use campus_graph::core::render::MAX_DPI;
use campus_graph::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `dpi`, `output_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Render a campus graph to PNG images.
    ///
    /// Writes a simple and a detailed rendering, then prints graph statistics.
    Render {
        /// Graph JSON file (defaults to config `input`)
        #[arg(value_name = "FILE")]
        input_file: Option<PathBuf>,
    },
    /// Print graph statistics without rendering.
    Stats {
        /// Graph JSON file (defaults to config `input`)
        #[arg(value_name = "FILE")]
        input_file: Option<PathBuf>,

        /// Report format: text (txt), json, or markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Find the shortest route between two locations.
    ///
    /// Names without an exact match also match door variations
    /// (e.g. `CP30` matches `CP30A` and `CP30B`).
    Route {
        /// Start location
        #[arg(value_name = "START")]
        start: String,

        /// End location
        #[arg(value_name = "END")]
        end: String,

        /// Graph JSON file (defaults to config `input`)
        #[arg(short, long, value_name = "FILE")]
        input_file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "campusgraph",
    about = "Render campus map graphs and compute graph statistics",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level for this run
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config image output directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config image output directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Override output resolution in dots per inch (1 to 1200)
    #[arg(
        long,
        value_name = "DPI",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DPI))
    )]
    pub dpi: Option<u32>,

    /// Override the spring layout seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--out-dir` takes precedence over `--config-out-dir` when both are given.
    /// `None` fields leave the config value untouched.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            output_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            dpi: self.dpi,
            seed: self.seed,
        }
    }
}
