use super::import::LoadReport;
use super::models::MetadataEntry;
use super::record::MediaRecord;
use std::collections::HashMap;
use tracing::debug;

/// Handle to a record owned by a [`Catalog`].
///
/// Ids are slot positions: they stay valid for the lifetime of the catalog,
/// and resolve to `None` once the record was removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

impl RecordId {
    pub fn position(&self) -> usize {
        self.0
    }
}

/// The in-memory collection of admitted media records.
///
/// Besides the records themselves it keeps two indexes in step with every
/// mutation: `value_index` maps a metadata value to the records currently
/// holding it (each id at most once per bucket), `path_index` maps a path to
/// its record.
#[derive(Debug, Default)]
pub struct Catalog {
    slots: Vec<Option<MediaRecord>>,
    value_index: HashMap<String, Vec<RecordId>>,
    path_index: HashMap<String, RecordId>,
    last_load: LoadReport,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.path_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path_index.is_empty()
    }

    /// Appends a record and indexes all of its values.
    ///
    /// Returns `None`, leaving the catalog untouched, when a record with the
    /// same path is already present.
    pub fn add(&mut self, record: MediaRecord) -> Option<RecordId> {
        if self.path_index.contains_key(record.path()) {
            return None;
        }
        let id = RecordId(self.slots.len());
        for entry in record.entries() {
            self.index_value(entry.value(), id);
        }
        self.path_index.insert(record.path().to_owned(), id);
        self.slots.push(Some(record));
        Some(id)
    }

    /// Takes a record out of the catalog. Its slot stays reserved so the
    /// positions of the other records never move.
    pub fn remove(&mut self, path: &str) -> Option<MediaRecord> {
        let id = self.path_index.remove(path)?;
        let record = self.slots.get_mut(id.0)?.take()?;
        for entry in record.entries() {
            self.unindex_value(entry.value(), id);
        }
        Some(record)
    }

    pub fn get(&self, id: RecordId) -> Option<&MediaRecord> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: RecordId) -> Option<&mut MediaRecord> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn find_by_path(&self, path: &str) -> Option<RecordId> {
        self.path_index.get(path).copied()
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.path_index.contains_key(path)
    }

    /// What the most recent successful load admitted and skipped.
    pub fn last_load(&self) -> &LoadReport {
        &self.last_load
    }

    pub(crate) fn set_last_load(&mut self, report: LoadReport) {
        self.last_load = report;
    }

    /// Ids of all records, in insertion order.
    pub fn all(&self) -> Vec<RecordId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &MediaRecord)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_ref().map(|r| (RecordId(position), r)))
    }

    pub fn add_metadata(&mut self, entry: MetadataEntry, id: RecordId) -> bool {
        let value = entry.value().to_owned();
        let added = match self.get_mut(id) {
            Some(record) => record.add(entry),
            None => false,
        };
        if added {
            self.index_value(&value, id);
        }
        added
    }

    pub fn remove_metadata(&mut self, entry: &MetadataEntry, id: RecordId) -> bool {
        let Some(record) = self.get_mut(id) else {
            return false;
        };
        if !record.delete(entry.key(), entry.value()) {
            return false;
        }
        // Another key of the same record may still carry this value.
        let still_held = record.has_value(entry.value());
        if !still_held {
            self.unindex_value(entry.value(), id);
        }
        true
    }

    /// Replaces every value under `entry.key()` with `entry.value()`.
    pub fn rewrite_metadata(&mut self, entry: &MetadataEntry, id: RecordId) -> bool {
        let Some(record) = self.get_mut(id) else {
            return false;
        };
        let old_values = record.values_for(entry.key()).to_vec();
        if !record.rewrite(entry.key(), entry.value()) {
            return false;
        }
        let released: Vec<String> = old_values
            .into_iter()
            .filter(|value| !record.has_value(value))
            .collect();

        for value in &released {
            self.unindex_value(value, id);
        }
        self.index_value(entry.value(), id);
        true
    }

    /// Removes the tag from every record that carries it and allows it.
    /// Returns how many records lost the tag.
    pub fn remove_metadata_everywhere(&mut self, entry: &MetadataEntry) -> usize {
        let holders: Vec<RecordId> = self.search_by_value(entry.value()).to_vec();
        let removed = holders
            .into_iter()
            .filter(|id| self.remove_metadata(entry, *id))
            .count();
        debug!("Removed {} from {} record(s)", entry, removed);
        removed
    }

    /// Records holding `term` as the value of any key.
    pub fn search_by_value(&self, term: &str) -> &[RecordId] {
        self.value_index
            .get(term)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Records carrying the exact key/value pair. Linear in the catalog size.
    pub fn search_by_entry(&self, key: &str, value: &str) -> Vec<RecordId> {
        self.iter()
            .filter(|(_, record)| record.contains_value(key, value))
            .map(|(id, _)| id)
            .collect()
    }

    fn index_value(&mut self, value: &str, id: RecordId) {
        let bucket = self.value_index.entry(value.to_owned()).or_default();
        if !bucket.contains(&id) {
            bucket.push(id);
        }
    }

    fn unindex_value(&mut self, value: &str, id: RecordId) {
        if let Some(bucket) = self.value_index.get_mut(value) {
            bucket.retain(|other| *other != id);
            if bucket.is_empty() {
                self.value_index.remove(value);
            }
        }
    }
}
