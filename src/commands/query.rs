use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser as SqlParser;

use crate::commands::config::load_or_default;
use crate::commands::lineage::{query_builder, resolve_cutoff};
use crate::lineage_engine::query::{Direction, Granularity};
use crate::validators::validate_request;

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Lineage level (object or column)
    #[clap(short, long, default_value = "object")]
    pub level: String,

    /// Object or column name to trace
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

    /// Maximum recursion depth, for lineage logs that may contain cycles
    #[clap(long)]
    pub max_depth: Option<u32>,

    /// Path to the project configuration file
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Parse the generated query and report whether it is well formed
    #[clap(long)]
    pub check: bool,
}

/// Build and display the lineage query without executing it. Useful for
/// auditing exactly what would run against the warehouse.
pub fn query_command(args: &QueryArgs) -> Result<()> {
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
        return Ok(());
    }

    let granularity: Granularity = args.level.parse()?;
    let direction: Direction = args.direction.parse()?;
    let config = load_or_default(args.config.clone())?;
    let cutoff = resolve_cutoff(args.date.as_deref(), args.time.as_deref())?;

    let builder = query_builder(&config, args.max_depth);
    let sql = builder.build(granularity, &args.name, direction, &cutoff);

    println!("{}", sql);

    if args.check {
        match SqlParser::parse_sql(&GenericDialect {}, &sql) {
            Ok(_) => println!("{}", "Query parses successfully.".green()),
            Err(err) => bail!("generated query failed to parse: {}", err),
        }
    }

    Ok(())
}
