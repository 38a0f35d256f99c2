use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Explore health-metric trends by demographic", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the trend for a metric, widening the selection when it has no data
    Select(SelectArgs),
    /// Compare demographic groups for one metric in one year
    Compare(CompareArgs),
    /// List the metrics, sexes, races and years available in a source
    Options(OptionsArgs),
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Input CSV file (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Metric name to chart
    #[arg(short = 'm', long = "metric")]
    pub metric: String,
    /// Restrict the trend to one sex label
    #[arg(long)]
    pub sex: Option<String>,
    /// Restrict the trend to one race/ethnicity label
    #[arg(long = "race")]
    pub race: Option<String>,
    /// Output rendering
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
    /// Also write the resulting series as CSV to this path
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Metric name to compare
    #[arg(short = 'm', long = "metric")]
    pub metric: String,
    /// Year of interest
    #[arg(short = 'y', long = "year")]
    pub year: i32,
    /// Output rendering
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
    /// Also write the comparison as CSV to this path
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Output rendering (`csv` is not supported here)
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
