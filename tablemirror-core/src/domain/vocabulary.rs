// tablemirror-core/src/domain/vocabulary.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of accepted string values for one configuration field.
///
/// Matching is exact: `PostgreSQL` is not `postgresql`.
pub trait Vocabulary: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == value)
    }

    /// Comma separated list used in diagnostics.
    fn allowed() -> String {
        Self::VARIANTS
            .iter()
            .map(|variant| variant.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEngine {
    Mssql,
    Postgresql,
    Mysql,
    Oracle,
    Db2,
}

impl Vocabulary for SourceEngine {
    const VARIANTS: &'static [Self] = &[
        Self::Mssql,
        Self::Postgresql,
        Self::Mysql,
        Self::Oracle,
        Self::Db2,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Mssql => "mssql",
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Oracle => "oracle",
            Self::Db2 => "db2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSourceType {
    Ftp,
    Fileserver,
    S3,
    Http,
}

impl Vocabulary for FileSourceType {
    const VARIANTS: &'static [Self] = &[Self::Ftp, Self::Fileserver, Self::S3, Self::Http];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Ftp => "ftp",
            Self::Fileserver => "fileserver",
            Self::S3 => "s3",
            Self::Http => "http",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Audio,
    Video,
    Image,
    Document,
}

impl Vocabulary for FileFormat {
    const VARIANTS: &'static [Self] = &[Self::Audio, Self::Video, Self::Image, Self::Document];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Image => "image",
            Self::Document => "document",
        }
    }
}

macro_rules! display_vocabulary {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

display_vocabulary!(SourceEngine, FileSourceType, FileFormat);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_vocabulary() {
        assert_eq!(SourceEngine::parse("db2"), Some(SourceEngine::Db2));
        assert_eq!(SourceEngine::parse("sqlite"), None);
        // Exact match only
        assert_eq!(SourceEngine::parse("PostgreSQL"), None);
        assert_eq!(
            SourceEngine::allowed(),
            "mssql, postgresql, mysql, oracle, db2"
        );
    }

    #[test]
    fn test_file_vocabularies() {
        assert_eq!(FileSourceType::parse("s3"), Some(FileSourceType::S3));
        assert_eq!(FileSourceType::parse("smb"), None);
        assert_eq!(FileFormat::parse("video"), Some(FileFormat::Video));
        assert_eq!(FileFormat::parse("spreadsheet"), None);
        assert_eq!(FileFormat::Document.to_string(), "document");
    }
}
