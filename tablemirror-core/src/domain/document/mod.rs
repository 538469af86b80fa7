// tablemirror-core/src/domain/document/mod.rs

pub mod ordered;

pub use ordered::OrderedMap;

use serde::Deserialize;

/// Root of the external-sources configuration.
///
/// Every top-level section is optional; an absent section behaves like an
/// empty one. Keys the tool does not know about (connection blocks, comments
/// for operators...) are ignored.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigDocument {
    #[serde(rename = "externalDBs", default)]
    pub external_dbs: Vec<ExternalSource>,

    #[serde(rename = "fileSources", default)]
    pub file_sources: Vec<FileSource>,

    #[serde(default)]
    pub processes: OrderedMap<ProcessSpec>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExternalSource {
    pub name: String,
    // Kept as raw text: an unknown engine is a validation error, not a parse error.
    pub engine: String,
    #[serde(default)]
    pub tables: Vec<TableDecl>,
}

/// One item of `tables`: `{ users: { schema: {...} } }`.
pub type TableDecl = OrderedMap<TableSpec>;

#[derive(Debug, Deserialize, Clone)]
pub struct TableSpec {
    pub schema: OrderedMap<ColumnSpec>,
}

/// Abstract column descriptor, before any engine-specific translation.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColumnSpec {
    #[serde(rename = "type")]
    pub type_token: String,
    #[serde(default)]
    pub primary_key: bool,
}

impl ColumnSpec {
    pub fn new(type_token: impl Into<String>) -> Self {
        Self {
            type_token: type_token.into(),
            primary_key: false,
        }
    }

    pub fn primary(type_token: impl Into<String>) -> Self {
        Self {
            type_token: type_token.into(),
            primary_key: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FileSource {
    pub name: String,
    pub source_type: String,
    pub file_format: String,
}

/// Opaque process definition. Only the presence of `process_steps` matters here.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct ProcessSpec(pub serde_yaml::Value);

impl ProcessSpec {
    pub fn has_process_steps(&self) -> bool {
        self.0
            .as_mapping()
            .is_some_and(|mapping| mapping.contains_key("process_steps"))
    }
}

/// A table declared by an external source, flattened for iteration.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredTable<'a> {
    pub source: &'a ExternalSource,
    pub name: &'a str,
    pub schema: &'a OrderedMap<ColumnSpec>,
}

impl ConfigDocument {
    /// Every declared table, sources first then tables, in document order.
    pub fn declared_tables(&self) -> impl Iterator<Item = DeclaredTable<'_>> {
        self.external_dbs.iter().flat_map(|source| {
            source.tables.iter().flat_map(move |decl| {
                decl.iter().map(move |(name, spec)| DeclaredTable {
                    source,
                    name,
                    schema: &spec.schema,
                })
            })
        })
    }
}
