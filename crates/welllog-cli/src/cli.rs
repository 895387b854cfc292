//! CLI argument definitions for the well-log normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "welllog",
    version,
    about = "Well-log normalizer - Convert decoded LAS/DLIS sections to JSON documents",
    long_about = "Convert decoded well-log files to normalized JSON documents.\n\n\
                  Reads a JSON snapshot of a parsed LAS or DLIS file and writes one\n\
                  document list per logical section: header, parameters, equipment,\n\
                  zones, tools, and per-frame curves with aligned data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert every section of a snapshot into JSON documents.
    Convert(ConvertArgs),

    /// Detect the format of well-log files from their leading bytes.
    Identify(IdentifyArgs),

    /// Print the effective extraction configuration as TOML.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the JSON snapshot of a decoded file.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Output directory for documents (default: the snapshot's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with extraction options.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Convert only the section with this logical file id.
    #[arg(long = "section", value_name = "ID")]
    pub section: Option<String>,

    /// Append one audit row per section to this CSV file.
    #[arg(long = "audit-csv", value_name = "FILE")]
    pub audit_csv: Option<PathBuf>,

    /// Write single-line JSON.
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(Parser)]
pub struct IdentifyArgs {
    /// Files to inspect.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Render this TOML file merged over the defaults instead of the defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
