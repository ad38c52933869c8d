//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use semtpl_output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "semtpl",
    version,
    about = "Convert semantic template spreadsheets to YAML (cubes, joins, dimensions, measures)",
    long_about = "Convert semantic template spreadsheets to YAML.\n\n\
                  Accepts an Excel workbook (one sheet per section), a folder containing\n\
                  cubes.csv/joins.csv/dimensions.csv/measures.csv, or a single CSV file.\n\
                  Sections are detected from their headers and sheet or file names."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v shows detection decisions, -vv score details, -q errors only).
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
    /// Convert a template into a YAML or JSON document.
    Convert(ConvertArgs),

    /// Show how each table or sheet would be classified, without writing output.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to an input workbook, CSV file, or template folder.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the output file (.yml, .yaml or .json).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Include only this cube by name and filter joins accordingly.
    #[arg(long = "only-cube", value_name = "NAME")]
    pub only_cube: Option<String>,

    /// Do not include unknown/extra columns in the output.
    #[arg(long = "no-include-unknown")]
    pub no_include_unknown: bool,

    /// Output format (default: from the output file extension, YAML otherwise).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Convert and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl ConvertArgs {
    /// Explicit `--format`, or the format implied by the output path.
    pub fn output_format(&self) -> OutputFormat {
        match self.format {
            Some(OutputFormatArg::Yaml) => OutputFormat::Yaml,
            Some(OutputFormatArg::Json) => OutputFormat::Json,
            None => OutputFormat::from_path(&self.output),
        }
    }
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to an input workbook, CSV file, or template folder.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Yaml,
    Json,
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
