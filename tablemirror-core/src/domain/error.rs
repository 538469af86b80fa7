// tablemirror-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    // --- VOCABULARY / DOCUMENT VALIDATION ---
    #[error("Unsupported database engine in 'externalDBs -> {source_name}': '{value}'")]
    #[diagnostic(
        code(tablemirror::domain::unsupported_engine),
        help("The engine must be one of: {allowed}")
    )]
    UnsupportedEngine {
        source_name: String,
        value: String,
        allowed: String,
    },

    #[error("Unsupported source type in 'fileSources -> {source_name}': '{value}'")]
    #[diagnostic(
        code(tablemirror::domain::unsupported_source_type),
        help("The source type must be one of: {allowed}")
    )]
    UnsupportedSourceType {
        source_name: String,
        value: String,
        allowed: String,
    },

    #[error("Unsupported file format in 'fileSources -> {source_name}': '{value}'")]
    #[diagnostic(
        code(tablemirror::domain::unsupported_file_format),
        help("The file format must be one of: {allowed}")
    )]
    UnsupportedFileFormat {
        source_name: String,
        value: String,
        allowed: String,
    },

    #[error("Process '{process}' is missing its 'process_steps' section")]
    #[diagnostic(
        code(tablemirror::domain::missing_process_steps),
        help("Every entry under 'processes' needs a 'process_steps' key.")
    )]
    MissingProcessSteps { process: String },

    // --- TYPE MAPPING ---
    #[error("Malformed type '{token}' for column '{column}': {reason}")]
    #[diagnostic(
        code(tablemirror::domain::malformed_type_parameter),
        help("Bounded text columns are declared as VARCHAR(N) with N a positive integer.")
    )]
    MalformedTypeParameter {
        column: String,
        token: String,
        reason: String,
    },

    #[error("Table '{table}' declares no columns")]
    #[diagnostic(
        code(tablemirror::domain::empty_schema),
        help("Add at least one column under 'schema'.")
    )]
    EmptySchema { table: String },
}
