use super::args::{parse_pairs, Usage};
use super::{CommandDefinition, CommandError, CommandHandler};
use crate::catalog::{Catalog, ResultSet};

const LIST_USAGE: Usage = Usage {
    command: "list",
    args: "[<term> ...]",
};

const LIST_META_USAGE: Usage = Usage {
    command: "list-meta",
    args: "<key> <value> ...",
};

/// `list [<term> ...]`: the whole catalog, or every file holding any of the
/// terms as a metadata value.
pub struct ListCommand;

impl CommandHandler for ListCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: LIST_USAGE.command,
            args: LIST_USAGE.args,
            description: "list all files, or those with any of the given values",
        }
    }

    fn handle(
        &self,
        params: &[String],
        _last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        if catalog.is_empty() {
            return Err(CommandError::EmptyCatalog);
        }
        if params.is_empty() {
            return Ok(ResultSet::of_catalog(catalog));
        }
        Ok(ResultSet::union(params.iter().map(|term| {
            catalog.search_by_value(term.trim()).iter().copied()
        })))
    }
}

/// `list-meta <key> <value> ...`: every file carrying any of the exact pairs.
pub struct ListMetaCommand;

impl CommandHandler for ListMetaCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: LIST_META_USAGE.command,
            args: LIST_META_USAGE.args,
            description: "list the files that have the given key/value pairs",
        }
    }

    fn handle(
        &self,
        params: &[String],
        _last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        if catalog.is_empty() {
            return Err(CommandError::EmptyCatalog);
        }
        let pairs = parse_pairs(params, LIST_META_USAGE)?;
        Ok(ResultSet::union(
            pairs
                .iter()
                .map(|entry| catalog.search_by_entry(entry.key(), entry.value())),
        ))
    }
}
