// tablemirror-core/src/ports/connector.rs

// What the synthesizer needs from a target store, without knowing which one.
// An engine is added by implementing this trait and giving it a Dialect.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::schema::{ColumnDefinition, Dialect, MirrorTable};
use crate::infrastructure::error::InfrastructureError;

/// A column as the target store reports it (independent of the engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistingColumn {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

#[async_trait]
pub trait Connector: Send + Sync {
    fn dialect(&self) -> Dialect;

    async fn execute(&self, statement: &str) -> Result<(), InfrastructureError>;

    /// Name under which the store holds `table_name`, if it holds it at all.
    ///
    /// Resolution follows the store's identifier rules: DuckDB matches
    /// case-insensitively, so the stored spelling may differ from the declared one.
    async fn find_table(&self, table_name: &str) -> Result<Option<String>, InfrastructureError>;

    /// Columns of `table_name` in declaration order. Empty when the table does not exist.
    async fn fetch_columns(&self, table_name: &str)
    -> Result<Vec<ExistingColumn>, InfrastructureError>;

    /// Creates the table if it is absent. Never touches an existing table.
    async fn create_table_if_absent(&self, table: &MirrorTable) -> Result<(), InfrastructureError> {
        for statement in self.dialect().create_table_statements(table) {
            tracing::debug!(table = %table.name, "DDL: {}", statement);
            self.execute(&statement).await?;
        }
        Ok(())
    }

    async fn add_column(
        &self,
        table_name: &str,
        column: &ColumnDefinition,
    ) -> Result<(), InfrastructureError> {
        for statement in self.dialect().add_column_statements(table_name, column) {
            tracing::debug!(table = table_name, "DDL: {}", statement);
            self.execute(&statement).await?;
        }
        Ok(())
    }
}
