use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;

use crate::commands::config::{load_or_default, LineageFlowConfig};
use crate::lineage_engine::executor::{QueryExecutor, SqliteExecutor};
use crate::lineage_engine::graph::LineageGraph;
use crate::lineage_engine::query::{Direction, Granularity, LineageQueryBuilder, TimeCutoff};
use crate::lineage_engine::render;
use crate::validators::validate_request;

/// Arguments for the lineage command
#[derive(Args, Debug)]
pub struct LineageArgs {
    /// Lineage level (object or column)
    #[clap(short, long, default_value = "object")]
    pub level: String,

    /// Object or column name to trace (e.g. DB.SCHEMA.TABLE or COLUMN)
    #[clap(short, long)]
    pub name: String,

    /// Traversal direction (upstream or forward)
    #[clap(short, long, default_value = "upstream")]
    pub direction: String,

    /// Cutoff date (YYYY-MM-DD); defaults to today
    #[clap(long)]
    pub date: Option<String>,

    /// Cutoff time (HH:MM:SS[.ffffff]); defaults to now
    #[clap(long)]
    pub time: Option<String>,

    /// Output format for the graph (dot, text, json)
    #[clap(short, long, default_value = "dot")]
    pub format: String,

    /// Maximum recursion depth, for lineage logs that may contain cycles
    #[clap(long)]
    pub max_depth: Option<u32>,

    /// Path to the warehouse database (overrides the configured one)
    #[clap(short, long)]
    pub warehouse: Option<PathBuf>,

    /// Path to the project configuration file
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress the generated query echo
    #[clap(short, long)]
    pub quiet: bool,
}

/// Run the lineage command: validate inputs, build the recursive query,
/// execute it against the warehouse and render the resulting graph.
pub fn lineage_command(args: &LineageArgs) -> Result<()> {
    let validation = validate_request(&args.name, args.date.as_deref(), args.time.as_deref());

    for warning in &validation.warnings {
        eprintln!("{}", warning.yellow());
    }
    for error in &validation.errors {
        eprintln!("{}", error.red());
    }
    if !validation.is_valid {
        bail!("invalid lineage request");
    }
    if validation.should_skip() {
        // A blank identifier is a no-op, not an error.
        return Ok(());
    }

    let granularity: Granularity = args.level.parse()?;
    let direction: Direction = args.direction.parse()?;
    let config = load_or_default(args.config.clone())?;
    let cutoff = resolve_cutoff(args.date.as_deref(), args.time.as_deref())?;

    let builder = query_builder(&config, args.max_depth);
    let sql = builder.build(granularity, &args.name, direction, &cutoff);

    if !args.quiet {
        println!("{}", "Generated SQL query:".green());
        println!("{}\n", sql);
    }

    let warehouse = args
        .warehouse
        .clone()
        .or_else(|| config.warehouse.as_ref().map(PathBuf::from));

    let graph = match warehouse {
        Some(path) => {
            let mut executor = SqliteExecutor::open(&path)?;
            LineageGraph::from_edges(executor.fetch_edges(&sql)?)
        }
        None => {
            eprintln!(
                "{}",
                "No warehouse configured; set 'warehouse' in lineageflow_project.yaml or pass --warehouse."
                    .yellow()
            );
            LineageGraph::new()
        }
    };

    if graph.is_empty() {
        println!("{}", "No lineage data found for the given criteria.".yellow());
        return Ok(());
    }

    render_graph(&graph, direction, &args.format)?;
    Ok(())
}

fn render_graph(graph: &LineageGraph, direction: Direction, format: &str) -> Result<()> {
    match format {
        "dot" => print!("{}", render::to_dot(graph, direction)),
        "text" => print!("{}", render::to_text(graph, direction)),
        "json" => println!("{}", render::to_json(graph)?),
        other => {
            println!(
                "Unsupported output format: {}. Using dot format instead.",
                other
            );
            print!("{}", render::to_dot(graph, direction));
        }
    }
    Ok(())
}

/// Combine the optional date and time flags into a single cutoff, filling
/// missing parts from the current local instant.
pub(crate) fn resolve_cutoff(date: Option<&str>, time: Option<&str>) -> Result<TimeCutoff> {
    let now = Local::now().naive_local();
    if date.is_none() && time.is_none() {
        return Ok(TimeCutoff::from_datetime(now));
    }

    let date = date
        .map(str::to_string)
        .unwrap_or_else(|| now.date().to_string());
    let time = time
        .map(str::to_string)
        .unwrap_or_else(|| now.time().format("%H:%M:%S").to_string());

    Ok(TimeCutoff::from_date_and_time(&date, &time)?)
}

/// Configure a query builder from project settings; a command-line depth cap
/// takes precedence over the configured one.
pub(crate) fn query_builder(
    config: &LineageFlowConfig,
    max_depth: Option<u32>,
) -> LineageQueryBuilder {
    let mut builder = LineageQueryBuilder::new()
        .with_object_table(config.object_table.as_str())
        .with_column_table(config.column_table.as_str())
        .with_max_depth(max_depth.or(config.max_depth));

    if let Some(schema) = &config.schema {
        builder = builder.with_schema(schema.as_str());
    }

    builder
}
