//! State threaded through the command loop.

use crate::catalog::{Catalog, ResultSet};
use crate::commands::{CommandDefinition, CommandError, CommandRegistry};

/// Owns the catalog and the result of the last successful command.
pub struct Session {
    registry: CommandRegistry,
    catalog: Catalog,
    last: ResultSet,
}

impl Session {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            catalog: Catalog::new(),
            last: ResultSet::empty(),
        }
    }

    /// Runs a command against the catalog. On success its result replaces
    /// the last result set; on failure the last result set is kept so the
    /// indices the user sees stay valid.
    pub fn execute(&mut self, name: &str, params: &[String]) -> Result<&ResultSet, CommandError> {
        let next = self
            .registry
            .execute(name, params, &self.last, &mut self.catalog)?;
        self.last = next;
        Ok(&self.last)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn last_result(&self) -> &ResultSet {
        &self.last
    }

    pub fn definitions(&self) -> Vec<CommandDefinition> {
        self.registry.definitions()
    }
}
