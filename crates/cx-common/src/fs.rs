//! Filesystem capability used by the conversion engine.
//!
//! The engine only ever needs three operations: open a file for
//! reading, check for existence, and write a whole text file. Keeping
//! them behind a trait keeps `std::fs` out of the engine and lets tests
//! drive conversions inside temp directories.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Capability interface over the host filesystem.
pub trait FileSystem {
    /// Open the file at `path` for reading.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>>;

    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create or truncate the file at `path` and write `contents` to it.
    fn write_all_text(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(path)?))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_all_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}
