// tablemirror-core/src/infrastructure/fs.rs

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::infrastructure::error::InfrastructureError;

/// Serializes `value` as pretty JSON and writes it to `path` atomically.
///
/// The JSON goes to a temporary file next to `path` which is then renamed
/// over it, so a reader never sees a half-written report. Missing parent
/// directories are created.
pub fn write_json_atomic<P, T>(path: P, value: &T) -> Result<(), InfrastructureError>
where
    P: AsRef<Path>,
    T: Serialize + ?Sized,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_vec_pretty(value)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(&content)?;
    temp_file.write_all(b"\n")?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}
