// tablemirror-core/src/infrastructure/adapters/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::domain::schema::Dialect;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{Connector, ExistingColumn};

const COLUMNS_QUERY: &str = "SELECT column_name::text, data_type::text, is_nullable::text \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1 \
     ORDER BY ordinal_position";

// Quoted identifiers are case-sensitive in PostgreSQL and the DDL always quotes.
const TABLE_QUERY: &str = "SELECT table_name::text \
     FROM information_schema.tables \
     WHERE table_schema = current_schema() AND table_name = $1";

/// PostgreSQL target store. One connection: synthesis is strictly sequential.
pub struct PostgresConnector {
    pool: PgPool,
}

impl PostgresConnector {
    pub async fn connect(database_url: &str) -> Result<Self, InfrastructureError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Connector for PostgresConnector {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn execute(&self, statement: &str) -> Result<(), InfrastructureError> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map(|_result| ())
            .map_err(InfrastructureError::from)
    }

    async fn find_table(&self, table_name: &str) -> Result<Option<String>, InfrastructureError> {
        let row: Option<(String,)> = sqlx::query_as(TABLE_QUERY)
            .bind(table_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(name,)| name))
    }

    async fn fetch_columns(
        &self,
        table_name: &str,
    ) -> Result<Vec<ExistingColumn>, InfrastructureError> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(COLUMNS_QUERY)
            .bind(table_name)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name, data_type, is_nullable)| ExistingColumn {
                name,
                data_type,
                is_nullable: is_nullable == "YES",
            })
            .collect())
    }
}
