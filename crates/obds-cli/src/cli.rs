//! CLI argument definitions for `obds-to-fhir`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "obds-to-fhir",
    version,
    about = "Consolidate oBDS registry reports and map them to FHIR bundles",
    long_about = "Consolidate versioned oBDS cancer registry reports to their latest \
                  version and map them to idempotent FHIR transaction bundles.\n\n\
                  Identifiers are pseudonymized with salted SHA-256 hashes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Mapper settings file (TOML). Defaults apply when omitted.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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

    /// Allow raw patient identifiers in logs.
    ///
    /// Identifiers are PHI and are redacted unless this flag is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the latest version of every report in processing order.
    Consolidate(ConsolidateArgs),

    /// Print the pseudonym of an identifier for a resource kind.
    Pseudonymize(PseudonymizeArgs),

    /// Repair and normalize a DD.MM.YYYY registry date.
    NormalizeDate(NormalizeDateArgs),

    /// Map a report batch to a FHIR transaction bundle.
    Bundle(BundleArgs),
}

#[derive(Parser)]
pub struct ConsolidateArgs {
    /// JSON array of versioned reports.
    #[arg(value_name = "REPORTS_JSON")]
    pub reports: PathBuf,

    /// Report reason priority, highest first (repeatable; replaces the configured order).
    #[arg(long = "priority", value_name = "REASON")]
    pub priority: Vec<String>,

    /// Keep only these report reasons (repeatable).
    #[arg(long = "filter", value_name = "REASON")]
    pub filter: Vec<String>,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct PseudonymizeArgs {
    /// Resource kind (patient, condition, observation, medication-statement, procedure, surrogate).
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Raw identifier.
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Parser)]
pub struct NormalizeDateArgs {
    /// Date in DD.MM.YYYY form; 00 marks an unknown day or month.
    #[arg(value_name = "DATE", allow_hyphen_values = true)]
    pub date: String,
}

#[derive(Parser)]
pub struct BundleArgs {
    /// JSON array of versioned reports.
    #[arg(value_name = "REPORTS_JSON")]
    pub reports: PathBuf,

    /// Write the bundle to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Abort on the first report that cannot be mapped.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,
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
