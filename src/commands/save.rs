use super::args::Usage;
use super::{CommandDefinition, CommandError, CommandHandler};
use crate::catalog::{resolve_export_path, write_records, Catalog, ResultSet};
use std::path::PathBuf;

const SAVE_USAGE: Usage = Usage {
    command: "save",
    args: "<filename>",
};

const SAVE_SEARCH_USAGE: Usage = Usage {
    command: "save-search",
    args: "<filename>",
};

fn single_filename(params: &[String], usage: Usage) -> Result<&str, CommandError> {
    match params {
        [filename] if !filename.trim().is_empty() => Ok(filename.trim()),
        _ => Err(usage.malformed()),
    }
}

/// `save <filename>`: writes the whole catalog.
pub struct SaveCommand {
    export_dir: PathBuf,
}

impl SaveCommand {
    pub fn new(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }
}

impl CommandHandler for SaveCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: SAVE_USAGE.command,
            args: SAVE_USAGE.args,
            description: "save the whole collection to a file",
        }
    }

    fn handle(
        &self,
        params: &[String],
        _last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        let filename = single_filename(params, SAVE_USAGE)?;
        let path = resolve_export_path(&self.export_dir, filename)?;
        write_records(&path, catalog.iter().map(|(_, record)| record))?;
        Ok(ResultSet::empty())
    }
}

/// `save-search <filename>`: writes the files of the last result.
pub struct SaveSearchCommand {
    export_dir: PathBuf,
}

impl SaveSearchCommand {
    pub fn new(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }
}

impl CommandHandler for SaveSearchCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: SAVE_SEARCH_USAGE.command,
            args: SAVE_SEARCH_USAGE.args,
            description: "save the last result to a file",
        }
    }

    fn handle(
        &self,
        params: &[String],
        last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        let filename = single_filename(params, SAVE_SEARCH_USAGE)?;
        let path = resolve_export_path(&self.export_dir, filename)?;
        write_records(&path, last.records(catalog))?;
        Ok(ResultSet::empty())
    }
}
