//! Lineage engine: query construction, execution and graph building

pub mod executor;
pub mod graph;
pub mod query;
pub mod render;


/// Errors that can occur while building or running lineage queries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid cutoff timestamp '{value}': {source}")]
    Cutoff {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid argument: {0}")]
    Argument(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
