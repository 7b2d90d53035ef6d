//! Command handlers for the catalog REPL.
//!
//! Every handler receives the tokens following the command name, the
//! result set printed by the previous command and the catalog. It either
//! returns the result set the next command will index into, or fails
//! without having changed the catalog.

mod args;
mod list;
mod load;
mod metadata;
mod save;

pub use list::{ListCommand, ListMetaCommand};
pub use load::LoadCommand;
pub use metadata::{AddCommand, DelAllCommand, DelCommand, SetCommand};
pub use save::{SaveCommand, SaveSearchCommand};

use crate::catalog::{Catalog, ExportError, ImportError, MediaKind, ResultSet};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a single command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Invalid parameters, usage: {command} {usage}")]
    MalformedInput {
        command: &'static str,
        usage: &'static str,
    },

    #[error("No file at index {index}, the last result has {len} file(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The file at index {index} is no longer in the catalog")]
    RecordNotFound { index: usize },

    #[error("Key '{key}' is required for {kind} files and cannot be deleted")]
    MetadataKeyProtected { key: String, kind: MediaKind },

    #[error("Key '{key}' does not exist on this file")]
    MetadataKeyAbsent { key: String },

    #[error("{0}")]
    ImportDecodeFailure(#[source] ImportError),

    #[error("{0}")]
    ImportIoFailure(#[source] ImportError),

    #[error("{0}")]
    ExportIoFailure(#[from] ExportError),

    #[error("The catalog is empty")]
    EmptyCatalog,
}

impl From<ImportError> for CommandError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Decode { .. } => CommandError::ImportDecodeFailure(err),
            ImportError::NotFound(_) | ImportError::Io { .. } => CommandError::ImportIoFailure(err),
        }
    }
}

/// Name, argument synopsis and one-line description of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
}

/// A stateless catalog operation.
pub trait CommandHandler {
    fn definition(&self) -> CommandDefinition;

    fn handle(
        &self,
        params: &[String],
        last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError>;
}

/// Registry of the available handlers, keyed by command name.
pub struct CommandRegistry {
    handlers: BTreeMap<&'static str, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registry with every catalog command. `export_dir` is where `save`
    /// and `save-search` write relative file names.
    pub fn with_defaults(export_dir: impl Into<PathBuf>) -> Self {
        let export_dir = export_dir.into();
        let mut registry = Self::new();
        registry.register(LoadCommand);
        registry.register(ListCommand);
        registry.register(ListMetaCommand);
        registry.register(AddCommand);
        registry.register(SetCommand);
        registry.register(DelCommand);
        registry.register(DelAllCommand);
        registry.register(SaveCommand::new(export_dir.clone()));
        registry.register(SaveSearchCommand::new(export_dir));
        registry
    }

    pub fn register(&mut self, handler: impl CommandHandler + 'static) {
        let name = handler.definition().name;
        self.handlers.insert(name, Box::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn definitions(&self) -> Vec<CommandDefinition> {
        self.handlers.values().map(|h| h.definition()).collect()
    }

    pub fn execute(
        &self,
        name: &str,
        params: &[String],
        last: &ResultSet,
        catalog: &mut Catalog,
    ) -> Result<ResultSet, CommandError> {
        let handler = self
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        handler.handle(params, last, catalog)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
