//! Real-disk implementation of the file system operations.

use std::any::Any;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use super::content::FileContent;
use super::encoding::Encoding;
use super::stat::FileStat;
use super::{FileSystem, ReadCallback, StatCallback};

/// The operating system's file system.
///
/// This is the "original" implementation an overlay delegates to on a miss.
/// The asynchronous operations complete within the call; suspension belongs
/// to the host runtime, not to this type.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// Create a new handle to the OS file system.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn read_file(&self, path: &Path, encoding: Option<Encoding>, cb: ReadCallback<'_>) {
        cb(self.read_file_sync(path, encoding));
    }

    fn read_file_sync(&self, path: &Path, encoding: Option<Encoding>) -> io::Result<FileContent> {
        let bytes = read_disk(path)?;
        Ok(FileContent::render(bytes, encoding))
    }

    fn stat(&self, path: &Path, cb: StatCallback<'_>) {
        cb(self.stat_sync(path));
    }

    fn stat_sync(&self, path: &Path) -> io::Result<FileStat> {
        fs::metadata(path).map(|metadata| FileStat::from_metadata(&metadata))
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Read file bytes from disk.
fn read_disk(path: &Path) -> io::Result<Vec<u8>> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("{} is a directory", path.display()),
        ));
    }
    fs::read(path)
}
