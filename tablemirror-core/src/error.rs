// tablemirror-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum MirrorError {
    // --- ERREURS DU DOMAINE (Vocabulary, Document, Type mapping) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Connection) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- TARGET STORE ---
    #[error("Could not write mirror table '{table}': {source}")]
    #[diagnostic(
        code(tablemirror::schema_write),
        help("The target store rejected the DDL. Existing data was not modified.")
    )]
    SchemaWrite {
        table: String,
        #[source]
        source: InfrastructureError,
    },
}

impl From<std::io::Error> for MirrorError {
    fn from(err: std::io::Error) -> Self {
        MirrorError::Infrastructure(InfrastructureError::Io(err))
    }
}
