//! Recursive lineage query construction
//!
//! The builder turns a (granularity, identifier, direction, cutoff) request
//! into a single `WITH RECURSIVE` query whose fixed point is the transitive
//! closure of lineage edges reachable from the identifier. The actual
//! traversal is performed by the warehouse engine; this module only emits
//! query text and performs no I/O.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime, Timelike};

use super::{EngineError, EngineResult};

/// Timestamp column shared by both lineage log tables.
const EVENT_TIME_COLUMN: &str = "QUERY_START_TIME";

/// Accepted cutoff form: `YYYY-MM-DD HH:MM:SS` with an optional `.ffffff` fraction.
const CUTOFF_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Which lineage log table and identifier columns a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Object,
    Column,
}

impl Granularity {
    pub fn default_table(&self) -> &'static str {
        match self {
            Granularity::Object => "LINEAGE_OBJECT",
            Granularity::Column => "LINEAGE_COLUMN",
        }
    }

    pub fn source_column(&self) -> &'static str {
        match self {
            Granularity::Object => "SOURCE_OBJECT_NAME",
            Granularity::Column => "SOURCE_COLUMN_NAME",
        }
    }

    pub fn target_column(&self) -> &'static str {
        match self {
            Granularity::Object => "TARGET_OBJECT_NAME",
            Granularity::Column => "TARGET_COLUMN_NAME",
        }
    }
}

impl FromStr for Granularity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "object" => Ok(Granularity::Object),
            "column" => Ok(Granularity::Column),
            other => Err(EngineError::Argument(format!(
                "unknown lineage level '{}' (expected 'object' or 'column')",
                other
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Object => write!(f, "object"),
            Granularity::Column => write!(f, "column"),
        }
    }
}

/// Traversal direction relative to the seed identifier.
///
/// Upstream walks backward toward the origins that fed the identifier;
/// Forward walks toward everything derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Upstream,
    Forward,
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upstream" | "backward" => Ok(Direction::Upstream),
            "forward" | "downstream" => Ok(Direction::Forward),
            other => Err(EngineError::Argument(format!(
                "unknown direction '{}' (expected 'upstream' or 'forward')",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Upstream => write!(f, "upstream"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

/// Inclusive upper bound on lineage log event time.
///
/// Rows recorded at exactly the cutoff instant are still part of the result,
/// which is what makes "lineage as of time T" reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCutoff(NaiveDateTime);

impl TimeCutoff {
    /// Parse a `YYYY-MM-DD HH:MM:SS[.ffffff]` string.
    pub fn parse(value: &str) -> EngineResult<Self> {
        let trimmed = value.trim();
        NaiveDateTime::parse_from_str(trimmed, CUTOFF_FORMAT)
            .map(TimeCutoff)
            .map_err(|source| EngineError::Cutoff {
                value: trimmed.to_string(),
                source,
            })
    }

    /// Combine separate date and time inputs into one cutoff.
    pub fn from_date_and_time(date: &str, time: &str) -> EngineResult<Self> {
        Self::parse(&format!("{} {}", date.trim(), time.trim()))
    }

    /// The current local instant, the default cutoff for interactive use.
    pub fn now() -> Self {
        TimeCutoff(Local::now().naive_local())
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        TimeCutoff(datetime)
    }
}

impl fmt::Display for TimeCutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))?;
        let micros = self.0.nanosecond() / 1_000;
        if micros > 0 {
            write!(f, ".{:06}", micros)?;
        }
        Ok(())
    }
}

/// Builds recursive transitive-closure queries over the lineage log tables.
///
/// Table names come from a fixed per-granularity allow-list (optionally
/// overridden by project configuration), never from per-request input. The
/// seed identifier is uppercased before embedding because the log store
/// records identifiers uppercase, and embedded single quotes are doubled.
#[derive(Debug, Clone)]
pub struct LineageQueryBuilder {
    object_table: String,
    column_table: String,
    schema: Option<String>,
    max_depth: Option<u32>,
}

impl Default for LineageQueryBuilder {
    fn default() -> Self {
        Self {
            object_table: Granularity::Object.default_table().to_string(),
            column_table: Granularity::Column.default_table().to_string(),
            schema: None,
            max_depth: None,
        }
    }
}

impl LineageQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Qualify both log tables with a `DB.SCHEMA` style prefix.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        let schema = schema.into();
        self.schema = if schema.trim().is_empty() {
            None
        } else {
            Some(schema)
        };
        self
    }

    /// Override the object-level log table name.
    pub fn with_object_table(mut self, table: impl Into<String>) -> Self {
        self.object_table = table.into();
        self
    }

    /// Override the column-level log table name.
    pub fn with_column_table(mut self, table: impl Into<String>) -> Self {
        self.column_table = table.into();
        self
    }

    /// Cap the recursion depth. Without a cap, termination relies on the
    /// engine reaching a fixed point, which a cyclic lineage log can defeat.
    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fully qualified log table for the given granularity.
    pub fn table_name(&self, granularity: Granularity) -> String {
        let table = match granularity {
            Granularity::Object => &self.object_table,
            Granularity::Column => &self.column_table,
        };
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, table),
            None => table.clone(),
        }
    }

    /// Emit the recursive closure query for one lineage request.
    ///
    /// The base case seeds the recursion with every log row whose seed-side
    /// column matches the identifier; the recursive case extends the frontier
    /// one hop per iteration under the same cutoff filter. Identical inputs
    /// produce byte-identical text.
    pub fn build(
        &self,
        granularity: Granularity,
        identifier: &str,
        direction: Direction,
        cutoff: &TimeCutoff,
    ) -> String {
        let table = self.table_name(granularity);
        let source_col = granularity.source_column();
        let target_col = granularity.target_column();
        let seed = normalize_identifier(identifier);
        let cutoff = cutoff.to_string();

        // Upstream walks target -> source, forward walks source -> target.
        let (alias, seed_col, join_col, link_col) = match direction {
            Direction::Upstream => ("bl", target_col, target_col, "source"),
            Direction::Forward => ("fl", source_col, source_col, "target"),
        };

        let mut sql = String::from("WITH RECURSIVE lineage_graph (target, source, level) AS (\n");
        sql.push_str(&format!(
            "    SELECT {} AS target, {} AS source, 1\n",
            target_col, source_col
        ));
        sql.push_str(&format!("    FROM {}\n", table));
        sql.push_str(&format!("    WHERE {} = '{}'\n", seed_col, seed));
        sql.push_str(&format!("      AND {} <= '{}'\n", EVENT_TIME_COLUMN, cutoff));
        sql.push_str("    UNION ALL\n");
        sql.push_str(&format!(
            "    SELECT l.{}, l.{}, {}.level + 1\n",
            target_col, source_col, alias
        ));
        sql.push_str(&format!("    FROM {} l\n", table));
        sql.push_str(&format!(
            "    JOIN lineage_graph {} ON l.{} = {}.{}\n",
            alias, join_col, alias, link_col
        ));
        sql.push_str(&format!(
            "    WHERE l.{} <= '{}'\n",
            EVENT_TIME_COLUMN, cutoff
        ));
        if let Some(max_depth) = self.max_depth {
            sql.push_str(&format!("      AND {}.level < {}\n", alias, max_depth));
        }
        sql.push_str(")\n");
        sql.push_str("SELECT DISTINCT source, target FROM lineage_graph");
        sql
    }
}

/// Uppercase the identifier for case-insensitive matching and double any
/// embedded single quotes so the literal cannot break out of its quoting.
fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_uppercase().replace('\'', "''")
}
