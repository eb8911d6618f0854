//! CLI argument definitions for seqsub.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use seqsub_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "seqsub",
    version,
    about = "Build BioSample, SRA and GISAID submission tables from a specimen table",
    long_about = "Split a tab-separated specimen table into per-repository submission tables.\n\n\
                  Each selected repository gets its own table with renamed, filtered columns;\n\
                  rows with blank mandatory fields are excluded and reported. A shared table\n\
                  and a merged view of all tables are always written."
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
    /// Build the submission tables.
    Run(RunArgs),

    /// Print the mandatory and optional fields of each destination.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// TOML file with run settings; flags override its values.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tab-separated specimen table.
    #[arg(long = "specimen-table", value_name = "PATH")]
    pub specimen_table: Option<PathBuf>,

    /// BioSample attribute package XML (required with `bs`).
    #[arg(long = "biosample-schema", value_name = "PATH")]
    pub biosample_schema: Option<PathBuf>,

    /// Static metadata CSV with `db`, `key`, `value` columns.
    #[arg(long = "static-metadata", value_name = "PATH")]
    pub static_metadata: Option<PathBuf>,

    /// Repository column map CSV.
    #[arg(long = "column-map", value_name = "PATH")]
    pub column_map: Option<PathBuf>,

    /// Identifier column of the specimen table.
    #[arg(long = "entity-id", value_name = "COLUMN")]
    pub entity_id: Option<String>,

    /// Destinations to build (bs, sra, gs). The shared table is always built.
    #[arg(long = "destinations", value_name = "TAGS", value_delimiter = ',')]
    pub destinations: Option<Vec<String>>,

    /// Cloud storage prefix for SRA read files, e.g. gs://bucket/reads/.
    #[arg(long = "cloud-uri", value_name = "URI")]
    pub cloud_uri: Option<String>,

    /// Value written to filepaths.csv.
    #[arg(long = "read-path-export", value_enum)]
    pub read_path_export: Option<ReadPathExportArg>,

    /// Output directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only keep these sample identifiers.
    #[arg(long = "samples", value_name = "IDS")]
    pub samples: Option<String>,

    /// Separator of the --samples list.
    #[arg(long = "samples-delimiter", value_name = "CHAR", default_value_t = ',')]
    pub samples_delimiter: char,

    /// Run every stage and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// BioSample attribute package XML; BioSample is skipped without it.
    #[arg(long = "biosample-schema", value_name = "PATH")]
    pub biosample_schema: Option<PathBuf>,

    /// Identifier column of the specimen table.
    #[arg(long = "entity-id", value_name = "COLUMN")]
    pub entity_id: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReadPathExportArg {
    /// Base filename of each read file.
    Basename,
    /// Value after the cloud URI prefix is applied.
    Rewritten,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
