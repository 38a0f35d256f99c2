pub mod aggregate;
pub mod cli;
pub mod data;
pub mod error;
pub mod export;
pub mod insight;
pub mod io_utils;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod options;
pub mod sanitize;
pub mod schema;
pub mod selection;
pub mod table;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, debug, info};
use serde::Serialize;

use crate::{
    cli::{Cli, Commands, CompareArgs, OptionsArgs, OutputFormat, SelectArgs, SourceArgs},
    insight::{PercentChange, audience_label, display_metric_name, percent_change, summarize},
    loader::LoadOptions,
    model::Table,
    selection::{Selection, SelectionResult},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("insightbridge", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Select(args) => handle_select(&args),
        Commands::Compare(args) => handle_compare(&args),
        Commands::Options(args) => handle_options(&args),
    }
}

fn load_source(args: &SourceArgs) -> Result<Table> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let options = LoadOptions {
        delimiter: args.delimiter,
        encoding,
    };
    info!(
        "Loading '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(io_utils::resolve_input_delimiter(&args.input, args.delimiter))
    );
    loader::load(&args.input, &options).with_context(|| format!("Loading {:?}", args.input))
}

/// Everything the renderer needs for one selection.
#[derive(Debug, Serialize)]
pub struct SelectionReport {
    pub title: String,
    pub selection: Selection,
    pub result: SelectionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<PercentChange>,
    pub summary: String,
}

impl SelectionReport {
    pub fn build(table: &Table, selection: Selection) -> Self {
        let result = selection::select(table, &selection);
        let percent_change = result.trend().map(percent_change);
        let summary = summarize(&selection, &result);
        let mut title = display_metric_name(&selection.metric);
        if let Some(audience) = audience_label(&selection) {
            title.push_str(" - ");
            title.push_str(&audience);
        }
        Self {
            title,
            selection,
            result,
            percent_change,
            summary,
        }
    }
}

fn handle_select(args: &SelectArgs) -> Result<()> {
    let dataset = load_source(&args.source)?;
    let selection = Selection::new(&args.metric, args.sex.as_deref(), args.race.as_deref());
    debug!("Running selection {:?}", selection);
    let report = SelectionReport::build(&dataset, selection);

    match args.format {
        OutputFormat::Table => {
            println!("{}", report.title);
            match &report.result {
                SelectionResult::Trend { series, .. } => print!("{}", table::render_trend(series)),
                SelectionResult::SingleYearComparison { comparison, .. } => {
                    print!("{}", table::render_comparison(comparison))
                }
                SelectionResult::Empty => {}
            }
            println!("{}", report.summary);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => {
            export::export_to_path(Path::new("-"), &report.result)?;
        }
    }

    if let Some(path) = &args.export {
        export::export_to_path(path, &report.result)?;
        info!("Exported selection to {:?}", path);
    }
    Ok(())
}

fn handle_compare(args: &CompareArgs) -> Result<()> {
    let dataset = load_source(&args.source)?;
    let comparison = aggregate::group_comparison(&dataset, &args.metric, args.year);
    if comparison.is_empty() {
        info!(
            "No rows for metric '{}' in {}; nothing to compare",
            args.metric, args.year
        );
    }

    match args.format {
        OutputFormat::Table => {
            println!("{} - {}", display_metric_name(&args.metric), args.year);
            print!("{}", table::render_comparison(&comparison));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Csv => {
            let mut writer = io_utils::open_csv_writer(None)?;
            export::write_comparison_csv(&mut writer, &comparison)?;
        }
    }

    if let Some(path) = &args.export {
        let mut writer = io_utils::open_csv_writer(Some(path.as_path()))?;
        export::write_comparison_csv(&mut writer, &comparison)
            .with_context(|| format!("Writing export to {path:?}"))?;
        info!("Exported comparison to {:?}", path);
    }
    Ok(())
}

fn handle_options(args: &OptionsArgs) -> Result<()> {
    let dataset = load_source(&args.source)?;
    let options = options::selector_options(&dataset);
    match args.format {
        OutputFormat::Table => {
            let rows = [
                ("metric", options.metrics.clone()),
                ("sex", options.sexes.clone()),
                ("race_ethnicity", options.races.clone()),
                (
                    "year",
                    options.years.iter().map(|y| y.to_string()).collect(),
                ),
            ]
            .into_iter()
            .flat_map(|(kind, values)| {
                values
                    .into_iter()
                    .map(move |value| vec![kind.to_string(), value])
            })
            .collect::<Vec<_>>();
            let headers = vec!["option".to_string(), "value".to_string()];
            print!("{}", table::render_table(&headers, &rows));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Csv => bail!("--format csv is not supported for options"),
    }
    info!(
        "Listed {} metric(s) across {} year(s)",
        options.metrics.len(),
        options.years.len()
    );
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
