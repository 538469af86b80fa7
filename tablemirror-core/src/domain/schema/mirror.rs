// tablemirror-core/src/domain/schema/mirror.rs

use serde::Serialize;
use tracing::warn;

use crate::domain::document::{ColumnSpec, OrderedMap};
use crate::domain::error::DomainError;
use crate::domain::schema::mapper::{ColumnDefinition, map_column};

/// Target-side table derived from one declared external table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirrorTable {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl MirrorTable {
    /// Maps every column of `schema`, keeping declaration order.
    pub fn from_schema(
        name: &str,
        schema: &OrderedMap<ColumnSpec>,
    ) -> Result<Self, DomainError> {
        if schema.is_empty() {
            return Err(DomainError::EmptySchema {
                table: name.to_string(),
            });
        }

        let columns = schema
            .iter()
            .map(|(column, spec)| map_column(column, spec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            columns,
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn primary_key(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Mirror tables declared during one run.
///
/// Owned by the run and passed explicitly to whoever needs it; there is no
/// process-wide registry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    tables: Vec<MirrorTable>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table. Declaring the same table twice extends the first
    /// declaration with the columns it did not have yet.
    pub fn register(&mut self, table: MirrorTable) -> &MirrorTable {
        let position = match self.tables.iter().position(|t| t.name == table.name) {
            Some(position) => {
                let existing = &mut self.tables[position];
                warn!(table = %table.name, "Table declared more than once, extending the first declaration");
                for column in table.columns {
                    if existing.column(&column.name).is_none() {
                        existing.columns.push(column);
                    }
                }
                position
            }
            None => {
                self.tables.push(table);
                self.tables.len() - 1
            }
        };
        &self.tables[position]
    }

    pub fn get(&self, name: &str) -> Option<&MirrorTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn tables(&self) -> &[MirrorTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
