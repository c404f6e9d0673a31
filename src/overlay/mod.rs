//! The interception layer: an in-memory overlay decorating a file system.
//!
//! [`OverlayFs`] wraps any [`FileSystem`] and answers the four operations
//! from its [`VirtualFileTable`] first, delegating to the wrapped
//! implementation — untouched — for every path not registered:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         OverlayFs                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  read_file / read_file_sync ──► table lookup                 │
//! │  stat / stat_sync               │                            │
//! │                                 ├─ hit ──► synthesize from   │
//! │                                 │          stored content    │
//! │                                 │                            │
//! │                                 └─ miss ─► inner.<operation> │
//! │                                            (args unchanged)  │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoration is idempotent: [`OverlayFs::decorate`] recognizes a file
//! system that is already an overlay and returns it as-is, keeping every
//! previously registered file. Distinct decorated instances share nothing —
//! each carries its own table.

mod table;

pub use table::{VirtualFile, VirtualFileTable};

use std::any::Any;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::RwLock;
use thiserror::Error;

use crate::fs::{
    Encoding, FileContent, FileStat, FileSystem, ReadCallback, StatCallback,
};

// =============================================================================
// Registration
// =============================================================================

/// A (path, content) pair to register as a virtual file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFileOptions {
    /// Target path the file will be served under. Canonicalized on insert.
    pub path: PathBuf,
    /// The bytes to serve. An empty file is a valid virtual file.
    pub content: Vec<u8>,
}

impl VirtualFileOptions {
    /// Bundle a target path and content for registration.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self { path: path.into(), content: content.into() }
    }

    fn validate(&self) -> Result<(), RegisterError> {
        if self.path.as_os_str().is_empty() {
            return Err(RegisterError::MissingPath);
        }
        Ok(())
    }
}

/// Error raised when a registration is rejected.
///
/// Rejection happens before any decoration or table mutation, so a failed
/// registration leaves existing entries untouched.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// No target path was supplied.
    #[error("virtual file registration requires a target path")]
    MissingPath,
}

/// Register a virtual file against a file system.
///
/// Decorates `fs` if it is not already decorated, then inserts (or
/// overwrites) the table entry for `options.path`. Returns the decorated
/// handle: reads issued through it — including by callers that received the
/// handle before later registrations — observe every registered file.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use virtual_file_loader::{register_virtual_file, OsFileSystem, VirtualFileOptions};
///
/// let fs = register_virtual_file(
///     Arc::new(OsFileSystem::new()),
///     VirtualFileOptions::new("/project/generated.js", "module.exports = 42;"),
/// )?;
/// let content = fs.read_file_sync("/project/generated.js".as_ref(), None)?;
/// ```
pub fn register_virtual_file(
    fs: Arc<dyn FileSystem>,
    options: VirtualFileOptions,
) -> Result<Arc<OverlayFs>, RegisterError> {
    options.validate()?;
    let overlay = OverlayFs::decorate(fs);
    overlay.add_file(options)?;
    Ok(overlay)
}

// =============================================================================
// OverlayFs
// =============================================================================

/// A [`FileSystem`] decorator that serves registered paths from memory.
///
/// Constructed via [`OverlayFs::decorate`]. The table lives behind a
/// [`RwLock`] only so the overlay can be shared via [`Arc`] while
/// registrations keep arriving; operations never block each other beyond
/// that single lock.
pub struct OverlayFs {
    inner: Arc<dyn FileSystem>,
    table: RwLock<VirtualFileTable>,
}

impl OverlayFs {
    /// Decorate a file system with an empty virtual file table.
    ///
    /// Idempotent: when `inner` is itself an `OverlayFs`, that same overlay
    /// is returned — no second table, no second layer of wrapping, and every
    /// file registered earlier stays retrievable. The check is the wrapper
    /// type's identity, recovered by downcast, rather than a marker stashed
    /// on a shared object.
    pub fn decorate(inner: Arc<dyn FileSystem>) -> Arc<OverlayFs> {
        match inner.clone().as_any_arc().downcast::<OverlayFs>() {
            Ok(decorated) => decorated,
            Err(_) => {
                debug!("decorating file system with in-memory overlay");
                Arc::new(OverlayFs { inner, table: RwLock::new(VirtualFileTable::new()) })
            }
        }
    }

    /// Insert or overwrite a virtual file.
    pub fn add_file(&self, options: VirtualFileOptions) -> Result<(), RegisterError> {
        options.validate()?;
        debug!(
            "registering virtual file {} ({} bytes)",
            options.path.display(),
            options.content.len()
        );
        self.table.write().add(options.path, options.content);
        Ok(())
    }

    /// The wrapped file system misses delegate to.
    pub fn inner(&self) -> &Arc<dyn FileSystem> {
        &self.inner
    }

    /// Number of registered virtual files.
    pub fn file_count(&self) -> usize {
        self.table.read().len()
    }

    /// Whether `path` (under any spelling) is currently served from memory.
    pub fn is_virtual_path(&self, path: &Path) -> bool {
        self.table.read().lookup(path).is_some()
    }

    fn lookup_content(&self, path: &Path) -> Option<Vec<u8>> {
        self.table.read().lookup(path).map(|file| file.content().to_vec())
    }

    fn lookup_size(&self, path: &Path) -> Option<u64> {
        self.table.read().lookup(path).map(VirtualFile::size)
    }
}

impl fmt::Debug for OverlayFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayFs")
            .field("files", &self.table.read().len())
            .finish_non_exhaustive()
    }
}

impl FileSystem for OverlayFs {
    fn read_file(&self, path: &Path, encoding: Option<Encoding>, cb: ReadCallback<'_>) {
        if let Some(bytes) = self.lookup_content(path) {
            trace!("read_file hit: {}", path.display());
            cb(Ok(FileContent::render(bytes, encoding)));
            return;
        }
        self.inner.read_file(path, encoding, cb);
    }

    fn read_file_sync(&self, path: &Path, encoding: Option<Encoding>) -> io::Result<FileContent> {
        if let Some(bytes) = self.lookup_content(path) {
            trace!("read_file_sync hit: {}", path.display());
            return Ok(FileContent::render(bytes, encoding));
        }
        self.inner.read_file_sync(path, encoding)
    }

    fn stat(&self, path: &Path, cb: StatCallback<'_>) {
        if let Some(size) = self.lookup_size(path) {
            trace!("stat hit: {}", path.display());
            cb(Ok(FileStat::for_virtual_file(size)));
            return;
        }
        self.inner.stat(path, cb);
    }

    fn stat_sync(&self, path: &Path) -> io::Result<FileStat> {
        if let Some(size) = self.lookup_size(path) {
            trace!("stat_sync hit: {}", path.display());
            return Ok(FileStat::for_virtual_file(size));
        }
        self.inner.stat_sync(path)
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
