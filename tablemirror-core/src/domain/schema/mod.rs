// tablemirror-core/src/domain/schema/mod.rs

pub mod dialect;
pub mod mapper;
pub mod mirror;

pub use dialect::{Dialect, quote_ident};
pub use mapper::{ColumnDefinition, ColumnType, map_column};
pub use mirror::{Catalog, MirrorTable};
