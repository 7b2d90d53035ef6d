//! Common test infrastructure
//!
//! Tests import from this module only.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestSession, SONG_PATH};
//!
//! #[test]
//! fn test_list_rock() {
//!     let mut session = TestSession::with_fixture();
//!     let result = session.run("list rock").unwrap();
//!     assert!(session.paths(&result).contains(&SONG_PATH.to_string()));
//! }
//! ```

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{write_fixture_catalog, write_garbage_catalog, write_json};

use media_catalog::catalog::ResultSet;
use media_catalog::commands::CommandError;
use media_catalog::{CommandRegistry, Session};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A session whose export directory is a fresh temporary directory.
pub struct TestSession {
    pub dir: TempDir,
    pub session: Session,
}

#[allow(dead_code)]
impl TestSession {
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let session = Session::new(CommandRegistry::with_defaults(dir.path()));
        TestSession { dir, session }
    }

    /// A session that already loaded the fixture catalog.
    pub fn with_fixture() -> Self {
        let mut test = Self::empty();
        let path = write_fixture_catalog(test.dir.path());
        test.run(&format!("load {}", path.display())).unwrap();
        test
    }

    /// Tokenizes `line` the way the REPL does and runs it.
    pub fn run(&mut self, line: &str) -> Result<ResultSet, CommandError> {
        let mut tokens = shlex::split(line).expect("unbalanced quotes");
        let name = tokens.remove(0);
        self.session.execute(&name, &tokens).cloned()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn export_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Paths of the files in `result`, in order.
    pub fn paths(&self, result: &ResultSet) -> Vec<String> {
        result
            .records(self.session.catalog())
            .map(|r| r.path().to_string())
            .collect()
    }

    /// Paths of the files the value index maps `value` to.
    pub fn indexed(&self, value: &str) -> Vec<String> {
        let catalog = self.session.catalog();
        let mut paths: Vec<String> = catalog
            .search_by_value(value)
            .iter()
            .filter_map(|id| catalog.get(*id))
            .map(|r| r.path().to_string())
            .collect();
        paths.sort();
        paths
    }

    /// Values of `key` on the file at `path`.
    pub fn values(&self, path: &str, key: &str) -> Vec<String> {
        let catalog = self.session.catalog();
        let id = catalog.find_by_path(path).expect("path not in catalog");
        catalog.get(id).unwrap().values_for(key).to_vec()
    }
}
