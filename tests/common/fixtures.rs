//! Fixture catalog files written into temporary directories.

use super::constants::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the four-file fixture catalog and returns its path.
pub fn write_fixture_catalog(dir: &Path) -> PathBuf {
    let items = json!([
        {
            "fullpath": REPORT_PATH,
            "type": "document",
            "metadata": { "creator": "Sam" }
        },
        {
            "fullpath": SONG_PATH,
            "type": "audio",
            "metadata": { "creator": "Ana", "runtime": "3:12", "genre": "rock" }
        },
        {
            "fullpath": TUNE_PATH,
            "type": "audio",
            "metadata": { "creator": "Ana", "runtime": "4:01", "genre": "jazz" }
        },
        {
            "fullpath": PHOTO_PATH,
            "type": "image",
            "metadata": { "creator": "Lee", "resolution": "1024x768", "genre": "rock" }
        }
    ]);
    write_json(dir, CATALOG_FILE, &items)
}

/// Writes a file whose only admissible item is `/media/docs/notes.txt`.
pub fn write_garbage_catalog(dir: &Path) -> PathBuf {
    let items = json!([
        { "fullpath": "/media/docs/empty.txt", "type": "document", "metadata": {} },
        { "fullpath": "/media/video/clip.mp4", "type": "video", "metadata": { "creator": "Ana" } },
        { "fullpath": REPORT_PATH, "type": "document", "metadata": { "creator": "Someone" } },
        { "fullpath": "/media/docs/notes.txt", "type": "document", "metadata": { "creator": "Sam" } }
    ]);
    write_json(dir, GARBAGE_FILE, &items)
}

pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}
