use super::catalog::{Catalog, RecordId};
use super::record::MediaRecord;

/// The ordered output of one command.
///
/// Positions are what the next command's `<index>` argument refers to. The
/// set only holds ids, the records stay owned by the [`Catalog`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    files: Vec<RecordId>,
}

impl ResultSet {
    pub fn new(files: Vec<RecordId>) -> Self {
        ResultSet { files }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Every record of the catalog, in insertion order.
    pub fn of_catalog(catalog: &Catalog) -> Self {
        ResultSet::new(catalog.all())
    }

    /// Builds a set from several id sequences, keeping only the first
    /// occurrence of each id.
    pub fn union<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = RecordId>,
    {
        let mut files: Vec<RecordId> = Vec::new();
        for id in sources.into_iter().flatten() {
            if !files.contains(&id) {
                files.push(id);
            }
        }
        ResultSet { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<RecordId> {
        self.files.get(index).copied()
    }

    pub fn ids(&self) -> &[RecordId] {
        &self.files
    }

    /// Resolves the set against the catalog, skipping records that were
    /// removed since the set was produced.
    pub fn records<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = &'a MediaRecord> + 'a {
        self.files.iter().filter_map(|id| catalog.get(*id))
    }
}
