use serde::{Deserialize, Serialize};
use std::fmt;

/// One key/value tag attached to a media record.
///
/// Keys are not unique within a record: a file may carry several `genre`
/// entries with different values. Entries are replaced, never edited.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetadataEntry {
    key: String,
    value: String,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for MetadataEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// The fixed category of a media file, set when the record is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Document,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 4] = [
        MediaKind::Image,
        MediaKind::Audio,
        MediaKind::Document,
        MediaKind::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MediaKind::Document).unwrap();
        assert_eq!(json, "\"document\"");
    }

    #[test]
    fn test_media_kind_parses_lowercase() {
        let kind: MediaKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(kind, MediaKind::Video);
        assert!(serde_json::from_str::<MediaKind>("\"Video\"").is_err());
        assert!(serde_json::from_str::<MediaKind>("\"podcast\"").is_err());
    }

    #[test]
    fn test_metadata_entry_display() {
        let entry = MetadataEntry::new("genre", "rock");
        assert_eq!(entry.to_string(), "genre=rock");
        assert_eq!(entry.key(), "genre");
        assert_eq!(entry.value(), "rock");
    }
}
