// tablemirror-core/src/domain/schema/dialect.rs

use serde::{Deserialize, Serialize};
use sqlparser::ast::Ident;
use std::fmt;

use crate::domain::schema::mapper::{ColumnDefinition, ColumnType};
use crate::domain::schema::mirror::MirrorTable;

/// SQL flavour of a target store.
///
/// The type mapper stays engine-neutral; everything engine-specific about
/// spelling a column lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    DuckDb,
    Postgres,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuckDb => "duckdb",
            Self::Postgres => "postgres",
        }
    }

    /// Column type as written in DDL.
    pub fn type_sql(&self, column_type: &ColumnType) -> String {
        match (self, column_type) {
            (Self::Postgres, ColumnType::AutoIncrement) => "SERIAL".to_string(),
            (Self::DuckDb, ColumnType::AutoIncrement) => "INTEGER".to_string(),
            (_, ColumnType::Varchar(length)) => format!("VARCHAR({})", length),
            (_, ColumnType::Timestamp) => "TIMESTAMP".to_string(),
            (Self::Postgres, ColumnType::Float) => "DOUBLE PRECISION".to_string(),
            (Self::DuckDb, ColumnType::Float) => "DOUBLE".to_string(),
            (Self::Postgres, ColumnType::Json) => "JSONB".to_string(),
            (Self::DuckDb, ColumnType::Json) => "JSON".to_string(),
            (Self::Postgres, ColumnType::Text) => "TEXT".to_string(),
            (Self::DuckDb, ColumnType::Text) => "VARCHAR".to_string(),
        }
    }

    /// Statements creating `table` when it does not exist yet.
    ///
    /// DuckDB has no SERIAL, so auto-increment columns get their own
    /// sequence created beforehand.
    pub fn create_table_statements(&self, table: &MirrorTable) -> Vec<String> {
        let mut statements = self.sequence_statements(table);

        let mut definitions: Vec<String> = table
            .columns
            .iter()
            .map(|column| self.column_sql(&table.name, column))
            .collect();

        let primary_key = table.primary_key();
        if !primary_key.is_empty() {
            let keys: Vec<String> = primary_key.into_iter().map(quote_ident).collect();
            definitions.push(format!("PRIMARY KEY ({})", keys.join(", ")));
        }

        statements.push(format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(&table.name),
            definitions.join(", ")
        ));
        statements
    }

    /// Statements appending `column` to an existing table.
    ///
    /// Constraints are never added to an existing table: the column comes in
    /// nullable and without primary key. DuckDB cannot attach a sequence
    /// default on `ADD COLUMN`, so an auto-increment column arrives as a plain
    /// integer there.
    pub fn add_column_statements(&self, table: &str, column: &ColumnDefinition) -> Vec<String> {
        let if_not_exists = match self {
            Self::Postgres => "IF NOT EXISTS ",
            Self::DuckDb => "",
        };
        vec![format!(
            "ALTER TABLE {} ADD COLUMN {}{} {}",
            quote_ident(table),
            if_not_exists,
            quote_ident(&column.name),
            self.type_sql(&column.column_type)
        )]
    }

    /// Constraints a fresh `CREATE TABLE` gives `column` that
    /// `add_column_statements` cannot.
    pub fn constraints_lost_on_add(&self, column: &ColumnDefinition) -> Vec<&'static str> {
        let mut lost = Vec::new();
        if column.primary_key {
            lost.push("PRIMARY KEY");
        }
        if *self == Self::DuckDb && column.column_type == ColumnType::AutoIncrement {
            lost.push("DEFAULT nextval");
        }
        lost
    }

    /// Whether a type reported by `information_schema.columns.data_type`
    /// is what `column_type` would have created.
    pub fn type_matches(&self, column_type: &ColumnType, reported: &str) -> bool {
        let reported = reported.trim().to_lowercase();
        let expected: &[&str] = match (self, column_type) {
            (Self::Postgres, ColumnType::AutoIncrement) => &["integer"],
            (Self::Postgres, ColumnType::Varchar(_)) => &["character varying"],
            (Self::Postgres, ColumnType::Timestamp) => &["timestamp without time zone"],
            (Self::Postgres, ColumnType::Float) => &["double precision"],
            (Self::Postgres, ColumnType::Json) => &["jsonb"],
            (Self::Postgres, ColumnType::Text) => &["text"],
            (Self::DuckDb, ColumnType::AutoIncrement) => &["integer"],
            (Self::DuckDb, ColumnType::Varchar(_) | ColumnType::Text) => &["varchar"],
            (Self::DuckDb, ColumnType::Timestamp) => &["timestamp"],
            (Self::DuckDb, ColumnType::Float) => &["double"],
            (Self::DuckDb, ColumnType::Json) => &["json"],
        };
        expected.contains(&reported.as_str())
    }

    fn column_sql(&self, table: &str, column: &ColumnDefinition) -> String {
        let mut sql = format!(
            "{} {}",
            quote_ident(&column.name),
            self.type_sql(&column.column_type)
        );
        if *self == Self::DuckDb && column.column_type == ColumnType::AutoIncrement {
            sql.push_str(&format!(
                " DEFAULT nextval('{}')",
                sequence_name(table, &column.name)
            ));
        }
        sql
    }

    fn sequence_statements(&self, table: &MirrorTable) -> Vec<String> {
        if *self != Self::DuckDb {
            return Vec::new();
        }
        table
            .columns
            .iter()
            .filter(|c| c.column_type == ColumnType::AutoIncrement)
            .map(|c| {
                format!(
                    "CREATE SEQUENCE IF NOT EXISTS {}",
                    sequence_name(&table.name, &c.name)
                )
            })
            .collect()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Double-quoted identifier, embedded quotes doubled.
pub fn quote_ident(name: &str) -> String {
    Ident::with_quote('"', name).to_string()
}

/// `<table>_<column>_seq`, lowercased, restricted to `[a-z0-9_]`.
pub fn sequence_name(table: &str, column: &str) -> String {
    format!("{}_{}_seq", table, column)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
