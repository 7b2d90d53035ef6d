//! Reading catalog files and admitting their items.

use super::catalog::Catalog;
use super::record::MediaRecord;
use super::schema::StoredMedia;
use super::validation::ValidationError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An item that was read but not added to the catalog, with every reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub source: PathBuf,
    pub path: String,
    pub reasons: Vec<ValidationError>,
}

/// Outcome of admitting one or more catalog files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub admitted: usize,
    pub skipped: Vec<SkippedItem>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Reads and decodes one catalog file.
pub fn read_items(path: &Path) -> Result<Vec<StoredMedia>, ImportError> {
    if !path.is_file() {
        return Err(ImportError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ImportError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Admits decoded items: valid records whose path is new to the catalog are
/// added, everything else ends up in the report.
pub fn admit(catalog: &mut Catalog, source: &Path, items: Vec<StoredMedia>) -> LoadReport {
    let mut report = LoadReport::default();
    for item in items {
        let record: MediaRecord = item.into_record();
        let mut reasons = record.validation_errors();
        if reasons.is_empty() && catalog.contains_path(record.path()) {
            reasons.push(ValidationError::DuplicatePath {
                path: record.path().to_owned(),
            });
        }
        if !reasons.is_empty() {
            report.skipped.push(SkippedItem {
                source: source.to_path_buf(),
                path: record.path().to_owned(),
                reasons,
            });
            continue;
        }
        if catalog.add(record).is_some() {
            report.admitted += 1;
        }
    }
    report
}

/// Loads every file into the catalog.
///
/// All files are read and decoded before the catalog is touched, so a bad
/// file leaves the catalog as it was.
pub fn load_files<P: AsRef<Path>>(
    catalog: &mut Catalog,
    paths: &[P],
) -> Result<LoadReport, ImportError> {
    let decoded = paths
        .iter()
        .map(|path| read_items(path.as_ref()).map(|items| (path.as_ref(), items)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = LoadReport::default();
    for (path, items) in decoded {
        let file_report = admit(catalog, path, items);
        if file_report.admitted > 0 {
            info!(
                "Imported {} file(s) from {}",
                file_report.admitted,
                path.display()
            );
        }
        report.admitted += file_report.admitted;
        report.skipped.extend(file_report.skipped);
    }

    if !report.is_clean() {
        warn!("{} item(s) were ignored:", report.skipped.len());
        for item in &report.skipped {
            for reason in &item.reasons {
                warn!("- {}: {}", item.path, reason);
            }
        }
    }
    info!("Catalog has {} file(s)", catalog.len());
    catalog.set_last_load(report.clone());
    Ok(report)
}
