use super::CommandError;
use crate::catalog::{Catalog, MetadataEntry, RecordId, ResultSet};

/// Usage line of a command, carried into `MalformedInput`.
#[derive(Debug, Clone, Copy)]
pub(super) struct Usage {
    pub command: &'static str,
    pub args: &'static str,
}

impl Usage {
    pub fn malformed(&self) -> CommandError {
        CommandError::MalformedInput {
            command: self.command,
            usage: self.args,
        }
    }
}

/// Parses the leading `<index>` argument.
pub(super) fn parse_index(params: &[String], usage: Usage) -> Result<usize, CommandError> {
    params
        .first()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .ok_or_else(|| usage.malformed())
}

/// Groups `key value key value ...` into entries. Fails on an odd count or
/// when there is no pair at all.
pub(super) fn parse_pairs(
    params: &[String],
    usage: Usage,
) -> Result<Vec<MetadataEntry>, CommandError> {
    if params.is_empty() || params.len() % 2 != 0 {
        return Err(usage.malformed());
    }
    Ok(params
        .chunks_exact(2)
        .map(|pair| MetadataEntry::new(pair[0].trim(), pair[1].trim()))
        .collect())
}

/// Maps a position in the last result set to a live record.
pub(super) fn resolve_target(
    index: usize,
    last: &ResultSet,
    catalog: &Catalog,
) -> Result<RecordId, CommandError> {
    let id = last.get(index).ok_or(CommandError::IndexOutOfRange {
        index,
        len: last.len(),
    })?;
    if catalog.get(id).is_none() {
        return Err(CommandError::RecordNotFound { index });
    }
    Ok(id)
}
