use super::args::Usage;
use super::{CommandDefinition, CommandError, CommandHandler};
use crate::catalog::{load_files, Catalog, ResultSet};
use std::path::PathBuf;

const USAGE: Usage = Usage {
    command: "load",
    args: "<filename> ...",
};

/// `load <filename> ...`: imports catalog files. The load report is kept on
/// the catalog, see [`Catalog::last_load`].
pub struct LoadCommand;

impl CommandHandler for LoadCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: USAGE.command,
            args: USAGE.args,
            description: "load files into the collection",
        }
    }

    fn handle(
        &self,
        params: &[String],
        _last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        if params.is_empty() {
            return Err(USAGE.malformed());
        }
        let paths: Vec<PathBuf> = params.iter().map(|raw| resolve_input_path(raw)).collect();
        load_files(catalog, &paths)?;
        Ok(ResultSet::empty())
    }
}

fn resolve_input_path(raw: &str) -> PathBuf {
    crate::catalog::expand_home(raw).unwrap_or_else(|| PathBuf::from(raw))
}
