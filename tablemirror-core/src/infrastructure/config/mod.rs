pub mod connection;
pub mod document;

pub use connection::{TargetEngine, TargetSettings, postgres_url_from};
pub use document::{load_document, parse_document};
