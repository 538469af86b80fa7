// tablemirror-core/src/domain/schema/mapper.rs

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::domain::document::ColumnSpec;
use crate::domain::error::DomainError;

static VARCHAR_LENGTH: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^VARCHAR\s*\(\s*([^()]*?)\s*\)$"));

/// Engine-neutral column type. Each `Dialect` decides how it is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "length", rename_all = "snake_case")]
pub enum ColumnType {
    /// Integer fed by a sequence.
    AutoIncrement,
    /// Text bounded to the given number of characters.
    Varchar(u32),
    /// Timestamp, no time zone semantics.
    Timestamp,
    /// Scalar floating point. Also what `FLOAT[]` maps to.
    Float,
    /// The engine's native JSON type.
    Json,
    /// Unbounded text, the catch-all for unknown tokens.
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoIncrement => write!(f, "auto-increment integer"),
            Self::Varchar(length) => write!(f, "varchar({})", length),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Float => write!(f, "float"),
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Concrete column definition produced from one `ColumnSpec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
    pub primary_key: bool,
}

/// Maps one abstract column descriptor to a concrete column.
///
/// Rules, first match wins (token trimmed and compared case-insensitively):
/// `SERIAL`, `VARCHAR(N)`, `TIMESTAMP`, `FLOAT[]`, `JSONB`, then text.
/// Only `SERIAL` and `FLOAT[]` carry the `primary_key` flag through.
pub fn map_column(name: &str, spec: &ColumnSpec) -> Result<ColumnDefinition, DomainError> {
    let token = spec.type_token.trim().to_uppercase();

    let (column_type, keeps_primary_key) = match token.as_str() {
        "SERIAL" => (ColumnType::AutoIncrement, true),
        t if t.starts_with("VARCHAR") => (ColumnType::Varchar(varchar_length(name, spec)?), false),
        "TIMESTAMP" => (ColumnType::Timestamp, false),
        // Array-looking token, scalar column. Kept as declared until someone decides otherwise.
        "FLOAT[]" => (ColumnType::Float, true),
        "JSONB" => (ColumnType::Json, false),
        _ => {
            debug!(column = name, token = %spec.type_token, "Unknown type token, falling back to text");
            (ColumnType::Text, false)
        }
    };

    if spec.primary_key && !keeps_primary_key {
        warn!(
            column = name,
            token = %spec.type_token,
            "primary_key is only honoured for SERIAL and FLOAT[] columns, ignoring it"
        );
    }

    Ok(ColumnDefinition {
        name: name.to_string(),
        column_type,
        primary_key: spec.primary_key && keeps_primary_key,
    })
}

fn varchar_length(column: &str, spec: &ColumnSpec) -> Result<u32, DomainError> {
    let malformed = |reason: &str| DomainError::MalformedTypeParameter {
        column: column.to_string(),
        token: spec.type_token.clone(),
        reason: reason.to_string(),
    };

    let pattern = VARCHAR_LENGTH
        .as_ref()
        .map_err(|e| malformed(&format!("internal pattern error: {}", e)))?;

    let token = spec.type_token.trim().to_uppercase();
    let raw = pattern
        .captures(&token)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| malformed("expected a parenthesized length, e.g. VARCHAR(255)"))?;

    if raw.is_empty() {
        return Err(malformed("the length is empty"));
    }

    match raw.parse::<u32>() {
        Ok(0) => Err(malformed("the length must be greater than zero")),
        Ok(length) => Ok(length),
        Err(_) => Err(malformed(&format!("'{}' is not a positive integer", raw))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn map(token: &str) -> Result<ColumnDefinition, DomainError> {
        map_column("col", &ColumnSpec::new(token))
    }

    #[test]
    fn test_serial_honours_primary_key() {
        let col = map_column("id", &ColumnSpec::primary("SERIAL")).unwrap();
        assert_eq!(col.column_type, ColumnType::AutoIncrement);
        assert!(col.primary_key);

        let col = map_column("seq", &ColumnSpec::new("serial")).unwrap();
        assert_eq!(col.column_type, ColumnType::AutoIncrement);
        assert!(!col.primary_key);
    }

    #[test]
    fn test_varchar_lengths() {
        assert_eq!(map("VARCHAR(255)").unwrap().column_type, ColumnType::Varchar(255));
        assert_eq!(map("varchar(1)").unwrap().column_type, ColumnType::Varchar(1));
        assert_eq!(map(" VARCHAR ( 42 ) ").unwrap().column_type, ColumnType::Varchar(42));
    }

    #[test]
    fn test_malformed_varchar() {
        for token in ["VARCHAR()", "VARCHAR(abc)", "VARCHAR(0)", "VARCHAR(-3)", "VARCHAR", "VARCHAR(10"] {
            match map(token) {
                Err(DomainError::MalformedTypeParameter { column, token: t, .. }) => {
                    assert_eq!(column, "col");
                    assert_eq!(t, token);
                }
                other => panic!("{token}: expected MalformedTypeParameter, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_scalar_types() {
        assert_eq!(map("timestamp").unwrap().column_type, ColumnType::Timestamp);
        assert_eq!(map("JSONB").unwrap().column_type, ColumnType::Json);
    }

    #[test]
    fn test_float_array_is_scalar_float() {
        let col = map_column("embedding", &ColumnSpec::primary("float[]")).unwrap();
        assert_eq!(col.column_type, ColumnType::Float);
        assert!(col.primary_key);
    }

    #[test]
    fn test_unknown_tokens_fall_back_to_text() {
        for token in ["BLOB", "INTEGER", "FLOAT", "", "uuid"] {
            assert_eq!(map(token).unwrap().column_type, ColumnType::Text, "{token}");
        }
    }

    #[test]
    fn test_primary_key_dropped_on_other_types() {
        let col = map_column("email", &ColumnSpec::primary("VARCHAR(100)")).unwrap();
        assert!(!col.primary_key);
        let col = map_column("code", &ColumnSpec::primary("TEXT")).unwrap();
        assert!(!col.primary_key);
    }
}
