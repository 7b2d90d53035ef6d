mod catalog;
mod export;
mod import;
mod models;
mod record;
mod result_set;
mod schema;
mod validation;

pub use catalog::{Catalog, RecordId};
pub(crate) use export::expand_home;
pub use export::{resolve_export_path, write_records, ExportError};
pub use import::{admit, load_files, read_items, ImportError, LoadReport, SkippedItem};
pub use models::{MediaKind, MetadataEntry};
pub use record::MediaRecord;
pub use result_set::ResultSet;
pub use schema::{StoredMedia, StoredMetadataValue};
pub use validation::{ValidationError, ValidityPolicy};
