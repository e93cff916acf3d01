//! Archive documents on disk (JSON or YAML, picked by extension).

use std::path::Path;

use crate::{ArchiveError, ArchiveResult, MemoryArchive};

enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> ArchiveResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(ArchiveError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

pub fn load_archive(path: &Path) -> ArchiveResult<MemoryArchive> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path)?;
    let archive = match format {
        Format::Json => serde_json::from_str(&content)?,
        Format::Yaml => serde_yaml::from_str(&content)?,
    };
    Ok(archive)
}

pub fn save_archive(path: &Path, archive: &MemoryArchive) -> ArchiveResult<()> {
    let content = match format_of(path)? {
        Format::Json => serde_json::to_string_pretty(archive)?,
        Format::Yaml => serde_yaml::to_string(archive)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}
