// tablemirror-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::ValueRef;
use duckdb::{Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// Imports Hexagonaux
use crate::domain::schema::Dialect;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{Connector, ExistingColumn};

const COLUMNS_QUERY: &str = "SELECT column_name, data_type, is_nullable \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND lower(table_name) = lower(?) \
     ORDER BY ordinal_position";

const TABLE_QUERY: &str = "SELECT table_name \
     FROM information_schema.tables \
     WHERE table_schema = current_schema() AND lower(table_name) = lower(?)";

pub struct DuckDBConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, InfrastructureError> {
        self.conn
            .lock()
            .map_err(|_| InfrastructureError::Io(std::io::Error::other("DuckDB Mutex Poisoned")))
    }

    /// Number of rows currently stored in `table_name`.
    pub fn row_count(&self, table_name: &str) -> Result<u64, InfrastructureError> {
        let conn = self.lock()?;
        let query = format!(
            "SELECT COUNT(*) FROM {}",
            crate::domain::schema::quote_ident(table_name)
        );
        let count: i64 = conn.query_row(&query, [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// First `limit` rows of `table_name`, every value rendered as text.
    pub fn sample_rows(
        &self,
        table_name: &str,
        limit: usize,
    ) -> Result<Vec<Vec<String>>, InfrastructureError> {
        let conn = self.lock()?;
        let query = format!(
            "SELECT * FROM {} LIMIT {}",
            crate::domain::schema::quote_ident(table_name),
            limit
        );
        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query([])?;

        let mut sample = Vec::new();
        while let Some(row) = rows.next()? {
            let width = row.as_ref().column_count();
            let values = (0..width)
                .map(|i| match row.get_ref(i) {
                    Ok(ValueRef::Null) => "NULL".to_string(),
                    Ok(ValueRef::Text(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
                    Ok(val) => format!("{:?}", val),
                    Err(_) => "ERROR".to_string(),
                })
                .collect();
            sample.push(values);
        }
        Ok(sample)
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    fn dialect(&self) -> Dialect {
        Dialect::DuckDb
    }

    async fn execute(&self, statement: &str) -> Result<(), InfrastructureError> {
        let conn = self.lock()?;
        conn.execute(statement, [])
            .map(|_rows| ())
            .map_err(InfrastructureError::from)
    }

    async fn find_table(&self, table_name: &str) -> Result<Option<String>, InfrastructureError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(TABLE_QUERY)?;
        let mut rows = stmt.query([table_name])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    async fn fetch_columns(
        &self,
        table_name: &str,
    ) -> Result<Vec<ExistingColumn>, InfrastructureError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(COLUMNS_QUERY)?;

        let rows = stmt.query_map([table_name], |row| {
            Ok(ExistingColumn {
                name: row.get(0)?,
                data_type: row.get(1)?,
                is_nullable: row.get::<_, String>(2)? == "YES",
            })
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }

        Ok(columns)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[tokio::test]
    async fn test_duckdb_flow() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;

        // 1. Create table
        connector
            .execute("CREATE TABLE users (id INTEGER, name VARCHAR)")
            .await?;

        // 2. Fetch columns, in declaration order
        let columns = connector.fetch_columns("users").await?;
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].data_type, "INTEGER");
        assert_eq!(columns[1].name, "name");
        assert_eq!(columns[1].data_type, "VARCHAR");
        assert!(columns[1].is_nullable);
        Ok(())
    }

    #[tokio::test]
    async fn test_absent_table_has_no_columns() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        assert!(connector.fetch_columns("ghost").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_table_ignores_case() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        assert_eq!(connector.find_table("users").await?, None);

        connector.execute("CREATE TABLE users (id INTEGER)").await?;
        assert_eq!(connector.find_table("users").await?.as_deref(), Some("users"));
        assert_eq!(connector.find_table("USERS").await?.as_deref(), Some("users"));
        assert_eq!(connector.fetch_columns("Users").await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_row_count() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        connector.execute("CREATE TABLE t (v INTEGER)").await?;
        connector.execute("INSERT INTO t VALUES (1), (2)").await?;
        assert_eq!(connector.row_count("t")?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_sample_rows() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        connector.execute("CREATE TABLE t (v INTEGER, label VARCHAR)").await?;
        connector
            .execute("INSERT INTO t VALUES (1, 'a'), (2, NULL), (3, 'c')")
            .await?;

        let rows = connector.sample_rows("t", 2)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "a");
        assert_eq!(rows[1][1], "NULL");
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_error() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        // Invalid SQL
        let result = connector.execute("SELECT * FROM non_existent_table").await;
        assert!(result.is_err());
        Ok(())
    }
}
