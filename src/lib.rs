//! # virtual-file-loader
//!
//! Serve in-memory virtual files through a bundler's file system: register
//! raw bytes under a target path, and subsequent reads and stats for that
//! path are answered from memory while everything else falls through to the
//! real file system.
//!
//! Two layers:
//!
//! - **Overlay**: [`OverlayFs`] decorates any [`FileSystem`] with a
//!   [`VirtualFileTable`], intercepting the four file operations — read,
//!   synchronous read, stat, synchronous stat. Decoration is idempotent and
//!   per-instance; nothing is global.
//! - **Loader**: [`load`] wires the overlay into a bundler build — it parses
//!   the loader query, resolves the target path against the module graph,
//!   decodes the payload, registers the file, and emits a
//!   `module.exports = require("...")` stub for the host to resolve.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use virtual_file_loader::{register_virtual_file, OsFileSystem, VirtualFileOptions};
//!
//! let fs = register_virtual_file(
//!     Arc::new(OsFileSystem::new()),
//!     VirtualFileOptions::new("/project/generated.js", "module.exports = 42;"),
//! )?;
//!
//! // Served from memory; no such file exists on disk.
//! let content = fs.read_file_sync("/project/generated.js".as_ref(), None)?;
//!
//! // Anything unregistered still reads from disk.
//! let real = fs.read_file_sync("/etc/hostname".as_ref(), None)?;
//! ```
//!
//! ## Scope
//!
//! Virtual files live for the process only and are read-only: there is no
//! persistence, no write/delete/listing support, and no interception beyond
//! the four operations above.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fs;
pub mod loader;
pub mod overlay;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use virtual_file_loader::prelude::*;
/// ```
pub mod prelude {
    pub use crate::fs::{
        Encoding, FileContent, FileKind, FileStat, FileSystem, OsFileSystem,
    };
    pub use crate::loader::{BuildContext, LoaderOutput, ModuleGraphNode, load};
    pub use crate::overlay::{OverlayFs, VirtualFileOptions, register_virtual_file};
}

// =============================================================================
// File system surface
// =============================================================================

pub use fs::{
    Encoding, EncodingError, FileContent, FileKind, FileStat, FileSystem, OsFileSystem,
    ReadCallback, StatCallback, normalize_path,
};

// =============================================================================
// Overlay
// =============================================================================

pub use overlay::{
    OverlayFs, RegisterError, VirtualFile, VirtualFileOptions, VirtualFileTable,
    register_virtual_file,
};

// =============================================================================
// Loader
// =============================================================================

pub use loader::{
    BuildContext, DEFAULT_SRC_ENCODING, LoaderError, LoaderOutput, LoaderQuery,
    ModuleGraphNode, QueryError, load, resolve_context_dir, resolve_file,
};
