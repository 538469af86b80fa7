pub mod document;
pub mod error;
pub mod schema;
pub mod validation;
pub mod vocabulary;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use validation::{ValidationSummary, validate_document};
