//! Validity rules for media records.
//!
//! Every media kind has a set of required metadata keys. A record is only
//! admitted into the catalog when it carries each of them at least once, and
//! the same keys can never be removed afterwards through a plain delete.

use super::models::MediaKind;
use std::fmt;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingKey { key: &'static str },
    DuplicatePath { path: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingKey { key } => write!(f, "'{}' missing", key),
            ValidationError::DuplicatePath { path } => {
                write!(f, "Duplicate file (path '{}' already exists)", path)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Required and undeletable keys for one media kind.
///
/// Undeletable keys are the required keys: removing one would turn a valid
/// record invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPolicy {
    required: &'static [&'static str],
}

const IMAGE_KEYS: &[&str] = &["creator", "resolution"];
const AUDIO_KEYS: &[&str] = &["creator", "runtime"];
const DOCUMENT_KEYS: &[&str] = &["creator"];
const VIDEO_KEYS: &[&str] = &["creator", "resolution", "runtime"];

impl ValidityPolicy {
    pub fn for_kind(kind: MediaKind) -> Self {
        let required = match kind {
            MediaKind::Image => IMAGE_KEYS,
            MediaKind::Audio => AUDIO_KEYS,
            MediaKind::Document => DOCUMENT_KEYS,
            MediaKind::Video => VIDEO_KEYS,
        };
        ValidityPolicy { required }
    }

    pub fn required_keys(&self) -> &'static [&'static str] {
        self.required
    }

    pub fn undeletable_keys(&self) -> &'static [&'static str] {
        self.required
    }

    pub fn is_undeletable(&self, key: &str) -> bool {
        self.required.contains(&key)
    }

    /// Checks the required keys against a presence predicate, returning one
    /// error per missing key in table order.
    pub fn check<F>(&self, has_key: F) -> Vec<ValidationError>
    where
        F: Fn(&str) -> bool,
    {
        self.required
            .iter()
            .copied()
            .filter(|key| !has_key(key))
            .map(|key| ValidationError::MissingKey { key })
            .collect()
    }
}
