//! On-disk JSON shapes for catalog files.
//!
//! A catalog file is a JSON array of
//! `{ "fullpath": "...", "type": "image|audio|document|video", "metadata": { ... } }`.
//! A metadata key maps to a string, or to an array of strings when the
//! record carries several values for it.

use super::models::{MediaKind, MetadataEntry};
use super::record::MediaRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredMetadataValue {
    Single(String),
    Multiple(Vec<String>),
}

impl StoredMetadataValue {
    fn into_values(self) -> Vec<String> {
        match self {
            StoredMetadataValue::Single(value) => vec![value],
            StoredMetadataValue::Multiple(values) => values,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMedia {
    pub fullpath: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub metadata: BTreeMap<String, StoredMetadataValue>,
}

impl StoredMedia {
    /// Flattens the stored map into entries, keys in map order and values in
    /// array order.
    pub fn entries(&self) -> Vec<MetadataEntry> {
        self.metadata
            .iter()
            .flat_map(|(key, value)| {
                value
                    .clone()
                    .into_values()
                    .into_iter()
                    .map(move |v| MetadataEntry::new(key.as_str(), v))
            })
            .collect()
    }

    pub fn into_record(self) -> MediaRecord {
        let entries = self.entries();
        MediaRecord::new(self.fullpath, self.kind, entries)
    }
}

impl From<&MediaRecord> for StoredMedia {
    fn from(record: &MediaRecord) -> Self {
        let metadata = record
            .keys()
            .into_iter()
            .map(|key| {
                let value = match record.values_for(key) {
                    [single] => StoredMetadataValue::Single(single.clone()),
                    values => StoredMetadataValue::Multiple(values.to_vec()),
                };
                (key.to_owned(), value)
            })
            .collect();
        StoredMedia {
            fullpath: record.path().to_owned(),
            kind: record.kind(),
            metadata,
        }
    }
}
