// tablemirror-core/src/infrastructure/config/document.rs

use miette::NamedSource;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::document::ConfigDocument;
use crate::infrastructure::error::InfrastructureError;

/// Reads and decodes the external-sources document at `path`.
#[instrument]
pub fn load_document(path: &Path) -> Result<ConfigDocument, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }

    info!("Loading external sources document");
    let content = fs::read_to_string(path)?;
    parse_document(&content, &path.display().to_string())
}

/// Decodes a document already in memory. `origin` names it in diagnostics.
///
/// An empty document is a valid document with no sources.
pub fn parse_document(content: &str, origin: &str) -> Result<ConfigDocument, InfrastructureError> {
    if content.trim().is_empty() {
        return Ok(ConfigDocument::default());
    }

    serde_yaml::from_str(content).map_err(|err| {
        let location = err.location();
        // serde_yaml locations are 1-based already
        let line = location.as_ref().map(|l| l.line());
        let column = location.as_ref().map(|l| l.column());
        let position = match (line, column) {
            (Some(line), Some(column)) => format!(" at line {}, column {}", line, column),
            _ => String::new(),
        };
        let span = location.as_ref().map(|l| {
            let offset = l.index().min(content.len().saturating_sub(1));
            (offset, 1).into()
        });

        InfrastructureError::DocumentParse {
            origin: origin.to_string(),
            message: strip_location(&err.to_string()),
            line,
            column,
            position,
            src: NamedSource::new(origin, content.to_string()),
            span,
        }
    })
}

// serde_yaml appends " at line X column Y" to its messages; we render our own.
fn strip_location(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_valid_document() -> Result<()> {
        let doc = parse_document(
            "externalDBs:\n  - name: crm\n    engine: mysql\n    tables: []\n",
            "inline",
        )?;
        assert_eq!(doc.external_dbs[0].engine, "mysql");
        Ok(())
    }

    #[test]
    fn test_empty_document() -> Result<()> {
        let doc = parse_document("  \n", "inline")?;
        assert!(doc.external_dbs.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_error_reports_line_and_column() {
        let broken = "externalDBs:\n  - name: crm\n    engine: [postgresql\n";
        match parse_document(broken, "broken.yaml") {
            Err(InfrastructureError::DocumentParse {
                line,
                column,
                origin,
                ..
            }) => {
                assert_eq!(origin, "broken.yaml");
                assert!(line.is_some());
                assert!(column.is_some());
            }
            other => panic!("expected DocumentParse, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_field_is_a_parse_error() {
        let err = parse_document(
            "externalDBs:\n  - engine: postgresql\n",
            "inline",
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing field `name`"), "{message}");
    }

    #[test]
    fn test_load_document_from_disk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sources.yaml");
        fs::write(&path, "fileSources:\n  - name: a\n    source_type: ftp\n    file_format: audio\n")?;

        let doc = load_document(&path)?;
        assert_eq!(doc.file_sources.len(), 1);

        let missing = load_document(&dir.path().join("nope.yaml"));
        assert!(matches!(missing, Err(InfrastructureError::ConfigNotFound(_))));
        Ok(())
    }
}
