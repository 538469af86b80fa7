// tablemirror-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use self::duckdb::DuckDBConnector;
#[cfg(feature = "postgres")]
pub use self::postgres::PostgresConnector;
