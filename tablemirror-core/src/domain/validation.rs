// tablemirror-core/src/domain/validation.rs

use serde::Serialize;

use crate::domain::document::ConfigDocument;
use crate::domain::error::DomainError;
use crate::domain::vocabulary::{FileFormat, FileSourceType, SourceEngine, Vocabulary};

/// What a successful validation saw. Used for the success notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub external_sources: usize,
    pub tables: usize,
    pub file_sources: usize,
    pub processes: usize,
}

/// Checks the document against the closed vocabularies and the required
/// sections. Stops at the first violation.
///
/// Sections are checked in this order: `externalDBs`, `fileSources`, `processes`.
pub fn validate_document(doc: &ConfigDocument) -> Result<ValidationSummary, DomainError> {
    for source in &doc.external_dbs {
        check_vocabulary::<SourceEngine>(&source.engine).map_err(|allowed| {
            DomainError::UnsupportedEngine {
                source_name: source.name.clone(),
                value: source.engine.clone(),
                allowed,
            }
        })?;
    }

    for source in &doc.file_sources {
        check_vocabulary::<FileSourceType>(&source.source_type).map_err(|allowed| {
            DomainError::UnsupportedSourceType {
                source_name: source.name.clone(),
                value: source.source_type.clone(),
                allowed,
            }
        })?;
        check_vocabulary::<FileFormat>(&source.file_format).map_err(|allowed| {
            DomainError::UnsupportedFileFormat {
                source_name: source.name.clone(),
                value: source.file_format.clone(),
                allowed,
            }
        })?;
    }

    for (process, spec) in doc.processes.iter() {
        if !spec.has_process_steps() {
            return Err(DomainError::MissingProcessSteps {
                process: process.to_string(),
            });
        }
    }

    Ok(ValidationSummary {
        external_sources: doc.external_dbs.len(),
        tables: doc.declared_tables().count(),
        file_sources: doc.file_sources.len(),
        processes: doc.processes.len(),
    })
}

/// Resolves `value` in vocabulary `V`, or returns the allowed values.
pub fn check_vocabulary<V: Vocabulary>(value: &str) -> Result<V, String> {
    V::parse(value).ok_or_else(V::allowed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ConfigDocument {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_document() {
        let doc = parse(
            r#"
externalDBs:
  - name: crm
    engine: postgresql
    tables:
      - users:
          schema:
            id: { type: SERIAL, primary_key: true }
fileSources:
  - name: scans
    source_type: ftp
    file_format: image
processes:
  image:
    process_steps: [ocr]
"#,
        );
        let summary = validate_document(&doc).unwrap();
        assert_eq!(
            summary,
            ValidationSummary {
                external_sources: 1,
                tables: 1,
                file_sources: 1,
                processes: 1,
            }
        );
    }

    #[test]
    fn test_empty_document_is_valid() {
        let summary = validate_document(&ConfigDocument::default()).unwrap();
        assert_eq!(summary.tables, 0);
    }

    #[test]
    fn test_unsupported_engine_names_the_source() {
        let doc = parse(
            r#"
externalDBs:
  - name: good
    engine: oracle
  - name: local_cache
    engine: sqlite
"#,
        );
        let err = validate_document(&doc).unwrap_err();
        match &err {
            DomainError::UnsupportedEngine {
                source_name, value, ..
            } => {
                assert_eq!(source_name, "local_cache");
                assert_eq!(value, "sqlite");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("local_cache"));
        assert!(message.contains("sqlite"));
    }

    #[test]
    fn test_unsupported_source_type() {
        let doc = parse(
            r#"
fileSources:
  - name: share
    source_type: smb
    file_format: document
"#,
        );
        assert!(matches!(
            validate_document(&doc),
            Err(DomainError::UnsupportedSourceType { ref source_name, .. }) if source_name == "share"
        ));
    }

    #[test]
    fn test_unsupported_file_format() {
        let doc = parse(
            r#"
fileSources:
  - name: sheets
    source_type: http
    file_format: spreadsheet
"#,
        );
        assert!(matches!(
            validate_document(&doc),
            Err(DomainError::UnsupportedFileFormat { ref value, .. }) if value == "spreadsheet"
        ));
    }

    #[test]
    fn test_missing_process_steps() {
        let doc = parse(
            r#"
processes:
  audio:
    process_steps: [transcribe]
  video:
    description: not ready yet
"#,
        );
        assert_eq!(
            validate_document(&doc),
            Err(DomainError::MissingProcessSteps {
                process: "video".to_string()
            })
        );
    }

    #[test]
    fn test_sections_checked_in_document_order() {
        // Both sections are broken: the external source must be reported first.
        let doc = parse(
            r#"
processes:
  audio: {}
fileSources:
  - name: share
    source_type: smb
    file_format: audio
externalDBs:
  - name: cache
    engine: sqlite
"#,
        );
        assert!(matches!(
            validate_document(&doc),
            Err(DomainError::UnsupportedEngine { .. })
        ));
    }
}
