//! Media Catalog Library
//!
//! In-memory catalog of media files tagged with key/value metadata, plus
//! the command handlers the REPL binary drives.

pub mod catalog;
pub mod cli_style;
pub mod commands;
pub mod config;
pub mod session;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, MediaKind, MediaRecord, MetadataEntry, RecordId, ResultSet};
pub use commands::{CommandError, CommandHandler, CommandRegistry};
pub use session::Session;
