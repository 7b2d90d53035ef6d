//! Shared constants for the integration tests.
//!
//! The fixture catalog written by `fixtures::write_fixture_catalog` holds
//! these four files, in this order.

/// Document by Sam, no genre.
pub const REPORT_PATH: &str = "/media/docs/report.txt";

/// Audio by Ana, genre rock.
pub const SONG_PATH: &str = "/media/music/song.mp3";

/// Audio by Ana, genre jazz.
pub const TUNE_PATH: &str = "/media/music/tune.mp3";

/// Image by Lee, genre rock.
pub const PHOTO_PATH: &str = "/media/pics/cat.png";

/// Name of the fixture catalog inside the test directory.
pub const CATALOG_FILE: &str = "catalog.json";

/// A file mixing one valid item with an invalid and a duplicate one.
pub const GARBAGE_FILE: &str = "garbage.json";
