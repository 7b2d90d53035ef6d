//! Writing records back to a catalog file.

use super::record::MediaRecord;
use super::schema::StoredMedia;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Directory {} does not exist", .0.display())]
    Directory(PathBuf),

    #[error("Cannot expand '{0}': home directory unknown")]
    HomeDirUnknown(String),

    #[error("Could not encode the catalog: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves a user supplied file name against the export directory.
///
/// Absolute names are kept, `~/` is expanded against the home directory,
/// anything else lands in `export_dir`. The parent directory must already
/// exist.
pub fn resolve_export_path(export_dir: &Path, filename: &str) -> Result<PathBuf, ExportError> {
    let target = if filename.starts_with("~/") {
        expand_home(filename).ok_or_else(|| ExportError::HomeDirUnknown(filename.to_string()))?
    } else if Path::new(filename).is_absolute() {
        PathBuf::from(filename)
    } else {
        export_dir.join(filename)
    };
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.is_dir() {
        return Err(ExportError::Directory(parent));
    }
    Ok(target)
}

/// Expands a leading `~/`. `None` when there is no such prefix or the home
/// directory cannot be determined.
pub(crate) fn expand_home(raw: &str) -> Option<PathBuf> {
    let rest = raw.strip_prefix("~/")?;
    dirs::home_dir().map(|home| home.join(rest))
}

/// Serializes the records as a JSON array and replaces `path` with it.
///
/// The content goes to a temporary file next to the target first, so an
/// interrupted write never leaves a truncated catalog behind.
pub fn write_records<'a, I>(path: &Path, records: I) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a MediaRecord>,
{
    let stored: Vec<StoredMedia> = records.into_iter().map(StoredMedia::from).collect();
    let json = serde_json::to_vec_pretty(&stored)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(ExportError::Directory(dir.to_path_buf()));
    }
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| ExportError::Io(e.error))?;

    info!("Saved {} file(s) to {}", stored.len(), path.display());
    Ok(stored.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{read_items, MediaKind, MetadataEntry};
    use tempfile::TempDir;

    #[test]
    fn test_resolve_relative_name_into_export_dir() {
        let dir = TempDir::new().unwrap();
        let path = resolve_export_path(dir.path(), "out.json").unwrap();
        assert_eq!(path, dir.path().join("out.json"));
    }

    #[test]
    fn test_resolve_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = resolve_export_path(dir.path(), "nope/out.json").unwrap_err();
        assert!(matches!(err, ExportError::Directory(_)));
    }

    #[test]
    fn test_resolve_absolute_name() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let target = other.path().join("out.json");
        let path = resolve_export_path(dir.path(), target.to_str().unwrap()).unwrap();
        assert_eq!(path, target);
    }

    #[test]
    fn test_expand_home_prefix() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            expand_home("~/music/out.json"),
            Some(home.join("music/out.json"))
        );
        assert_eq!(expand_home("out.json"), None);
        assert_eq!(expand_home("/tmp/~/out.json"), None);
        assert_eq!(expand_home("~out.json"), None);
    }

    #[test]
    fn test_resolve_home_relative_name() {
        let Some(home) = dirs::home_dir().filter(|home| home.is_dir()) else {
            return;
        };
        let dir = TempDir::new().unwrap();
        let path = resolve_export_path(dir.path(), "~/out.json").unwrap();
        assert_eq!(path, home.join("out.json"));
        assert!(!path.starts_with(dir.path()));
    }

    #[test]
    fn test_write_then_read_back() {
        let dir = TempDir::new().unwrap();
        let mut record = MediaRecord::new(
            "/a/song.mp3",
            MediaKind::Audio,
            vec![
                MetadataEntry::new("creator", "Sam"),
                MetadataEntry::new("runtime", "3:12"),
            ],
        );
        record.add(MetadataEntry::new("genre", "rock"));
        record.add(MetadataEntry::new("genre", "jazz"));

        let path = dir.path().join("out.json");
        let written = write_records(&path, [&record]).unwrap();
        assert_eq!(written, 1);

        let items = read_items(&path).unwrap();
        assert_eq!(items.len(), 1);
        let restored = items.into_iter().next().unwrap().into_record();
        assert_eq!(restored.path(), record.path());
        assert_eq!(restored.kind(), MediaKind::Audio);
        assert_eq!(restored.values_for("genre"), &["rock", "jazz"]);
        assert_eq!(restored.values_for("runtime"), &["3:12"]);
    }

    #[test]
    fn test_write_empty_set() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        assert_eq!(write_records(&path, std::iter::empty()).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "old content").unwrap();
        write_records(&path, std::iter::empty()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
