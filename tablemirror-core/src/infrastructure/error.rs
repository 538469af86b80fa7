// tablemirror-core/src/infrastructure/error.rs

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(tablemirror::infra::database::duckdb),
        help("An error occurred inside the target store.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[cfg(feature = "postgres")]
    #[error("PostgreSQL Error: {0}")]
    #[diagnostic(
        code(tablemirror::infra::database::postgres),
        help("Check connectivity and the privileges of the configured role.")
    )]
    Postgres(#[from] sqlx::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(tablemirror::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("Invalid configuration document '{origin}'{position}: {message}")]
    #[diagnostic(
        code(tablemirror::infra::document_parse),
        help("Check your YAML syntax (indentation, types, required keys).")
    )]
    DocumentParse {
        origin: String,
        message: String,
        line: Option<usize>,
        column: Option<usize>,
        // Pre-rendered " at line L, column C" (empty when unknown)
        position: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("Configuration document not found at '{0}'")]
    #[diagnostic(
        code(tablemirror::infra::config_missing),
        help("Pass --config or set TABLEMIRROR_CONFIG.")
    )]
    ConfigNotFound(String),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(tablemirror::infra::config))]
    ConfigError(String),

    #[error("Serialization Error: {0}")]
    #[diagnostic(code(tablemirror::infra::json))]
    Json(#[from] serde_json::Error),
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for InfrastructureError {
    fn from(err: sqlx::Error) -> Self {
        InfrastructureError::Database(DatabaseError::Postgres(err))
    }
}
