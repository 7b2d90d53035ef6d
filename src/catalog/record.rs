use super::models::{MediaKind, MetadataEntry};
use super::validation::{ValidationError, ValidityPolicy};
use std::collections::HashMap;
use std::path::Path;

/// A single catalog entry.
///
/// `entries` keeps the tags in the order they were attached, `local_index`
/// groups the same tags by key so membership checks don't scan. Every method
/// that touches one updates the other before returning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaRecord {
    path: String,
    filename: String,
    kind: MediaKind,
    entries: Vec<MetadataEntry>,
    local_index: HashMap<String, Vec<String>>,
}

impl MediaRecord {
    /// Builds a record from raw entries. Exact duplicate tags collapse into
    /// one. No validity check happens here, see [`MediaRecord::is_valid`].
    pub fn new(
        path: impl Into<String>,
        kind: MediaKind,
        entries: impl IntoIterator<Item = MetadataEntry>,
    ) -> Self {
        let path = path.into();
        let filename = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());

        let mut record = MediaRecord {
            path,
            filename,
            kind,
            entries: Vec::new(),
            local_index: HashMap::new(),
        };
        for entry in entries {
            record.add(entry);
        }
        record
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn entries(&self) -> &[MetadataEntry] {
        &self.entries
    }

    pub fn policy(&self) -> ValidityPolicy {
        ValidityPolicy::for_kind(self.kind)
    }

    /// Attaches a tag. Returns false without touching anything when the
    /// exact key/value pair is already present.
    pub fn add(&mut self, entry: MetadataEntry) -> bool {
        if self.contains_value(entry.key(), entry.value()) {
            return false;
        }
        self.local_index
            .entry(entry.key().to_owned())
            .or_default()
            .push(entry.value().to_owned());
        self.entries.push(entry);
        true
    }

    /// Removes the single entry matching `key` and `value`.
    ///
    /// Refused for keys the kind's policy marks undeletable and for pairs the
    /// record doesn't carry.
    pub fn delete(&mut self, key: &str, value: &str) -> bool {
        if self.policy().is_undeletable(key) {
            return false;
        }
        let Some(position) = self
            .entries
            .iter()
            .position(|e| e.key() == key && e.value() == value)
        else {
            return false;
        };
        self.entries.remove(position);

        if let Some(values) = self.local_index.get_mut(key) {
            values.retain(|v| v != value);
            if values.is_empty() {
                self.local_index.remove(key);
            }
        }
        true
    }

    /// Replaces every value under `key` with the single `new_value`.
    ///
    /// Only fails when the key is absent. Undeletable keys are allowed here
    /// since the key survives the call.
    pub fn rewrite(&mut self, key: &str, new_value: &str) -> bool {
        if self.local_index.remove(key).is_none() {
            return false;
        }
        self.entries.retain(|e| e.key() != key);
        self.local_index
            .insert(key.to_owned(), vec![new_value.to_owned()]);
        self.entries.push(MetadataEntry::new(key, new_value));
        true
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// One error per required key the record lacks.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        self.policy().check(|key| self.contains_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.local_index.contains_key(key)
    }

    pub fn contains_value(&self, key: &str, value: &str) -> bool {
        self.local_index
            .get(key)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Values currently held under `key`, in insertion order.
    pub fn values_for(&self, key: &str) -> &[String] {
        self.local_index.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All entries under `key`, rebuilt from the local index.
    pub fn entries_for(&self, key: &str) -> Vec<MetadataEntry> {
        self.values_for(key)
            .iter()
            .map(|value| MetadataEntry::new(key, value.as_str()))
            .collect()
    }

    /// True when any entry, under any key, has this value.
    pub fn has_value(&self, value: &str) -> bool {
        self.entries.iter().any(|e| e.value() == value)
    }

    /// Keys in first-seen order, each listed once.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::with_capacity(self.local_index.len());
        for entry in &self.entries {
            if !keys.contains(&entry.key()) {
                keys.push(entry.key());
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_document() -> MediaRecord {
        MediaRecord::new(
            "/media/docs/report.pdf",
            MediaKind::Document,
            vec![MetadataEntry::new("creator", "Sam")],
        )
    }

    fn assert_index_matches_entries(record: &MediaRecord) {
        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for entry in record.entries() {
            grouped
                .entry(entry.key().to_string())
                .or_default()
                .push(entry.value().to_string());
        }
        assert_eq!(grouped, record.local_index);
    }

    #[test]
    fn test_filename_from_path() {
        let record = make_document();
        assert_eq!(record.filename(), "report.pdf");
        assert_eq!(record.path(), "/media/docs/report.pdf");
    }

    #[test]
    fn test_new_collapses_duplicate_entries() {
        let record = MediaRecord::new(
            "/a",
            MediaKind::Document,
            vec![
                MetadataEntry::new("creator", "Sam"),
                MetadataEntry::new("creator", "Sam"),
            ],
        );
        assert_eq!(record.entries().len(), 1);
        assert_index_matches_entries(&record);
    }

    #[test]
    fn test_add_rejects_duplicate_pair() {
        let mut record = make_document();
        assert!(record.add(MetadataEntry::new("genre", "rock")));
        let before = record.clone();
        assert!(!record.add(MetadataEntry::new("genre", "rock")));
        assert_eq!(record, before);
    }

    #[test]
    fn test_add_same_key_different_values() {
        let mut record = make_document();
        assert!(record.add(MetadataEntry::new("genre", "rock")));
        assert!(record.add(MetadataEntry::new("genre", "jazz")));
        assert_eq!(record.values_for("genre"), &["rock", "jazz"]);
        assert_eq!(record.entries_for("genre").len(), 2);
        assert_index_matches_entries(&record);
    }

    #[test]
    fn test_delete_single_value_keeps_siblings() {
        let mut record = make_document();
        record.add(MetadataEntry::new("genre", "rock"));
        record.add(MetadataEntry::new("genre", "jazz"));

        assert!(record.delete("genre", "rock"));
        assert_eq!(record.values_for("genre"), &["jazz"]);
        assert!(record.contains_key("genre"));
        assert_index_matches_entries(&record);

        assert!(record.delete("genre", "jazz"));
        assert!(!record.contains_key("genre"));
        assert_index_matches_entries(&record);
    }

    #[test]
    fn test_delete_missing_pair_fails() {
        let mut record = make_document();
        record.add(MetadataEntry::new("genre", "rock"));
        let before = record.clone();
        assert!(!record.delete("genre", "pop"));
        assert!(!record.delete("mood", "rock"));
        assert_eq!(record, before);
    }

    #[test]
    fn test_delete_required_key_refused_for_every_kind() {
        for kind in MediaKind::ALL {
            let policy = ValidityPolicy::for_kind(kind);
            let entries = policy
                .required_keys()
                .iter()
                .map(|key| MetadataEntry::new(*key, "x"));
            let mut record = MediaRecord::new("/f", kind, entries);
            assert!(record.is_valid());

            let before = record.clone();
            for key in policy.required_keys() {
                assert!(!record.delete(key, "x"));
            }
            assert_eq!(record, before);
            assert!(record.is_valid());
        }
    }

    #[test]
    fn test_rewrite_replaces_all_values() {
        let mut record = make_document();
        record.add(MetadataEntry::new("genre", "rock"));
        record.add(MetadataEntry::new("genre", "jazz"));

        assert!(record.rewrite("genre", "pop"));
        assert_eq!(record.entries_for("genre"), vec![MetadataEntry::new("genre", "pop")]);
        assert!(!record.has_value("rock"));
        assert!(!record.has_value("jazz"));
        assert_index_matches_entries(&record);
    }

    #[test]
    fn test_rewrite_allowed_on_required_key() {
        let mut record = make_document();
        assert!(record.rewrite("creator", "Alex"));
        assert!(record.contains_value("creator", "Alex"));
        assert!(!record.contains_value("creator", "Sam"));
        assert!(record.is_valid());
    }

    #[test]
    fn test_rewrite_absent_key_fails() {
        let mut record = make_document();
        let before = record.clone();
        assert!(!record.rewrite("genre", "pop"));
        assert_eq!(record, before);
    }

    #[test]
    fn test_validation_errors() {
        let record = MediaRecord::new(
            "/v.mp4",
            MediaKind::Video,
            vec![MetadataEntry::new("runtime", "90")],
        );
        assert!(!record.is_valid());
        assert_eq!(
            record.validation_errors(),
            vec![
                ValidationError::MissingKey { key: "creator" },
                ValidationError::MissingKey { key: "resolution" },
            ]
        );

        let empty_document = MediaRecord::new("/d", MediaKind::Document, Vec::new());
        assert!(!empty_document.is_valid());
    }

    #[test]
    fn test_keys_first_seen_order() {
        let mut record = make_document();
        record.add(MetadataEntry::new("genre", "rock"));
        record.add(MetadataEntry::new("year", "1999"));
        record.add(MetadataEntry::new("genre", "jazz"));
        assert_eq!(record.keys(), vec!["creator", "genre", "year"]);
    }
}
