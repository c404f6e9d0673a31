//! File system abstraction: the four intercepted operations.
//!
//! The [`FileSystem`] trait is the seam the overlay decorates. Anything
//! exposing the four operations qualifies — the real disk
//! ([`OsFileSystem`]), a bundler's input file system, or a test double:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     FileSystem trait                       │
//! ├────────────────────────────────────────────────────────────┤
//! │                                                            │
//! │  read_file(path, encoding, cb)     asynchronous read       │
//! │  read_file_sync(path, encoding)    synchronous read        │
//! │  stat(path, cb)                    asynchronous stat       │
//! │  stat_sync(path)                   synchronous stat        │
//! │                                                            │
//! └────────────────────────────────────────────────────────────┘
//!          ▲                                  ▲
//!          │                                  │
//!   OsFileSystem (disk)          OverlayFs (table, then delegate)
//! ```
//!
//! The asynchronous operations take completion callbacks rather than
//! returning futures: the host model is a single-threaded cooperative task
//! queue, and an implementation is free to invoke the callback before
//! returning (the overlay always does on a hit, since no real I/O occurs).
//!
//! The optional encoding of a read is an explicit `Option<Encoding>`
//! parameter — a fixed pair of call shapes, not runtime argument sniffing.

mod content;
mod encoding;
mod os;
mod path;
mod stat;

pub use content::FileContent;
pub use encoding::{Encoding, EncodingError};
pub use os::OsFileSystem;
pub use path::normalize_path;
pub use stat::{FileKind, FileStat};

use std::any::Any;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Completion callback for an asynchronous read.
pub type ReadCallback<'a> = Box<dyn FnOnce(io::Result<FileContent>) + 'a>;

/// Completion callback for an asynchronous stat.
pub type StatCallback<'a> = Box<dyn FnOnce(io::Result<FileStat>) + 'a>;

/// A file-system-like object: any type exposing the four named operations.
///
/// Implementations must be `Send + Sync` so a decorated file system can be
/// shared behind an [`Arc`] the way a bundler shares its input file system.
pub trait FileSystem: Send + Sync + 'static {
    /// Read a file asynchronously.
    ///
    /// On success the callback receives [`FileContent::Text`] when an
    /// encoding was requested and [`FileContent::Raw`] otherwise. Errors are
    /// whatever the implementation's I/O produces.
    fn read_file(&self, path: &Path, encoding: Option<Encoding>, cb: ReadCallback<'_>);

    /// Read a file synchronously. Same content contract as [`read_file`](Self::read_file).
    fn read_file_sync(&self, path: &Path, encoding: Option<Encoding>) -> io::Result<FileContent>;

    /// Stat a file asynchronously.
    fn stat(&self, path: &Path, cb: StatCallback<'_>);

    /// Stat a file synchronously.
    fn stat_sync(&self, path: &Path) -> io::Result<FileStat>;

    /// Upcast for runtime capability recovery.
    ///
    /// [`OverlayFs::decorate`](crate::overlay::OverlayFs::decorate) downcasts
    /// through this to detect a file system that is already decorated — the
    /// wrapper type's identity is the idempotency marker. Implementations
    /// return `self` verbatim:
    ///
    /// ```ignore
    /// fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
    ///     self
    /// }
    /// ```
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}
