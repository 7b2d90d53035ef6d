//! Handlers that edit metadata: `add`, `set`, `del` and `del-all`.
//!
//! Every argument is checked before the catalog is touched, so a failing
//! command never leaves a record half edited.

use super::args::{parse_index, parse_pairs, resolve_target, Usage};
use super::{CommandDefinition, CommandError, CommandHandler};
use crate::catalog::{Catalog, MetadataEntry, RecordId, ResultSet};
use tracing::{debug, info};

const ADD_USAGE: Usage = Usage {
    command: "add",
    args: "<index> <key> <value> ...",
};

const SET_USAGE: Usage = Usage {
    command: "set",
    args: "<index> <key> <value> ...",
};

const DEL_USAGE: Usage = Usage {
    command: "del",
    args: "<index> <key> ...",
};

const DEL_ALL_USAGE: Usage = Usage {
    command: "del-all",
    args: "<key> <value> ...",
};

/// Resolves `<index> <key> <value> ...` into the target record and its pairs.
fn indexed_pairs(
    params: &[String],
    usage: Usage,
    last: &ResultSet,
    catalog: &Catalog,
) -> Result<(usize, RecordId, Vec<MetadataEntry>), CommandError> {
    if params.len() < 3 {
        return Err(usage.malformed());
    }
    let index = parse_index(params, usage)?;
    let pairs = parse_pairs(&params[1..], usage)?;
    let id = resolve_target(index, last, catalog)?;
    Ok((index, id, pairs))
}

/// `add <index> <key> <value> ...`
pub struct AddCommand;

impl CommandHandler for AddCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: ADD_USAGE.command,
            args: ADD_USAGE.args,
            description: "add metadata to a file of the last result",
        }
    }

    fn handle(
        &self,
        params: &[String],
        last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        let (_, id, pairs) = indexed_pairs(params, ADD_USAGE, last, catalog)?;
        for entry in pairs {
            let shown = entry.to_string();
            if !catalog.add_metadata(entry, id) {
                debug!("Skipping {}, already present", shown);
            }
        }
        Ok(ResultSet::of_catalog(catalog))
    }
}

/// `set <index> <key> <value> ...`: replaces every value of each key.
pub struct SetCommand;

impl CommandHandler for SetCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: SET_USAGE.command,
            args: SET_USAGE.args,
            description: "replace the values of existing keys on a file",
        }
    }

    fn handle(
        &self,
        params: &[String],
        last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        let (index, id, pairs) = indexed_pairs(params, SET_USAGE, last, catalog)?;
        let record = catalog
            .get(id)
            .ok_or(CommandError::RecordNotFound { index })?;
        if let Some(missing) = pairs.iter().find(|e| !record.contains_key(e.key())) {
            return Err(CommandError::MetadataKeyAbsent {
                key: missing.key().to_string(),
            });
        }

        for entry in &pairs {
            catalog.rewrite_metadata(entry, id);
            debug!("Set {}", entry);
        }
        Ok(ResultSet::of_catalog(catalog))
    }
}

/// `del <index> <key> ...`: drops every value of each key.
pub struct DelCommand;

impl CommandHandler for DelCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: DEL_USAGE.command,
            args: DEL_USAGE.args,
            description: "delete keys from a file of the last result",
        }
    }

    fn handle(
        &self,
        params: &[String],
        last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        if params.len() < 2 {
            return Err(DEL_USAGE.malformed());
        }
        let index = parse_index(params, DEL_USAGE)?;
        let id = resolve_target(index, last, catalog)?;
        let keys: Vec<&str> = params[1..].iter().map(|k| k.trim()).collect();

        let record = catalog
            .get(id)
            .ok_or(CommandError::RecordNotFound { index })?;
        let policy = record.policy();
        for key in &keys {
            if policy.is_undeletable(key) {
                return Err(CommandError::MetadataKeyProtected {
                    key: key.to_string(),
                    kind: record.kind(),
                });
            }
            if !record.contains_key(key) {
                return Err(CommandError::MetadataKeyAbsent {
                    key: key.to_string(),
                });
            }
        }

        let doomed: Vec<MetadataEntry> = keys
            .iter()
            .flat_map(|key| record.entries_for(key))
            .collect();
        for entry in &doomed {
            if catalog.remove_metadata(entry, id) {
                debug!("Deleted {}", entry);
            }
        }
        Ok(ResultSet::of_catalog(catalog))
    }
}

/// `del-all <key> <value> ...`: removes the pairs from every file that has
/// them. Files protecting the key keep it.
pub struct DelAllCommand;

impl CommandHandler for DelAllCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: DEL_ALL_USAGE.command,
            args: DEL_ALL_USAGE.args,
            description: "delete key/value pairs from every file",
        }
    }

    fn handle(
        &self,
        params: &[String],
        _last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        let pairs = parse_pairs(params, DEL_ALL_USAGE)?;
        let removed: usize = pairs
            .iter()
            .map(|entry| catalog.remove_metadata_everywhere(entry))
            .sum();
        info!("Removed {} tag(s)", removed);
        Ok(ResultSet::of_catalog(catalog))
    }
}
