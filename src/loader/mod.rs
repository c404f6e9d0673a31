//! The loader entry point.
//!
//! One run of the loader turns a query into a served virtual file:
//!
//! ```text
//! query ──► parse + validate (src, file required)
//!            │
//!            ├─► resolve target path against the module graph
//!            ├─► decode src payload (hex by default)
//!            ├─► register the virtual file against the build's file system
//!            │
//!            └─► emit `module.exports = require("<target>");`
//! ```
//!
//! The emitted stub re-exports the now-virtual path, letting the host
//! bundler's own module resolution pick up the freshly injected file.

mod context;
mod query;

pub use context::{BuildContext, ModuleGraphNode, resolve_context_dir, resolve_file};
pub use query::{LoaderQuery, QueryError};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::fs::{Encoding, EncodingError, FileSystem};
use crate::overlay::{OverlayFs, RegisterError, VirtualFileOptions, register_virtual_file};

/// Encoding assumed for the `src` payload when the query names none.
pub const DEFAULT_SRC_ENCODING: Encoding = Encoding::Hex;

/// Everything a loader run produces.
#[derive(Debug)]
pub struct LoaderOutput {
    /// Resolved path now served from memory.
    pub path: PathBuf,
    /// Emitted module body re-exporting the virtual path.
    pub source: String,
    /// The decorated file system. Subsequent reads must go through this
    /// handle; later loader runs against it reuse the same overlay.
    pub fs: Arc<OverlayFs>,
}

/// Error raised when a loader run is rejected.
///
/// Every variant is a caller-input error surfaced immediately; nothing is
/// retried, and a failed run registers nothing.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A required query parameter is absent.
    #[error("virtual-file-loader requires `{0}` param")]
    MissingParam(&'static str),

    /// The query string could not be interpreted.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Unknown encoding name, or a `src` payload the encoding rejects.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The registration itself was rejected.
    #[error(transparent)]
    Register(#[from] RegisterError),
}

/// Run the loader: register the query's virtual file against `fs` and emit
/// the module stub.
///
/// Required query parameters are validated before `fs` is touched.
pub fn load(fs: Arc<dyn FileSystem>, ctx: &BuildContext) -> Result<LoaderOutput, LoaderError> {
    let query = LoaderQuery::parse(&ctx.query)?;
    let src = query.src.ok_or(LoaderError::MissingParam("src"))?;
    let file = query.file.ok_or(LoaderError::MissingParam("file"))?;
    let encoding = match &query.encoding {
        Some(name) => name.parse()?,
        None => DEFAULT_SRC_ENCODING,
    };

    let path = resolve_file(ctx, Path::new(&file));
    let content = encoding.decode_text(&src)?;
    debug!("loader run: {} -> {} ({encoding})", file, path.display());

    let fs = register_virtual_file(fs, VirtualFileOptions::new(path.clone(), content))?;
    let source = require_stub(&path);
    Ok(LoaderOutput { path, source, fs })
}

/// Module body re-exporting `path`. Backslashes are emitted as forward
/// slashes so the stub stays a valid module request on every platform.
fn require_stub(path: &Path) -> String {
    let request = path.display().to_string().replace('\\', "/");
    format!("module.exports = require(\"{request}\");")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FileContent, OsFileSystem};

    fn ctx(query: &str) -> BuildContext {
        BuildContext {
            query: query.to_string(),
            module: Some(ModuleGraphNode {
                reasons: vec![PathBuf::from("/app/pages/index.js")],
                issuer: String::new(),
            }),
        }
    }

    fn os_fs() -> Arc<dyn FileSystem> {
        Arc::new(OsFileSystem::new())
    }

    #[test]
    fn test_load_registers_and_emits_stub() {
        // "hello" in hex.
        let out = load(os_fs(), &ctx("?src=68656c6c6f&file=./gen.js")).unwrap();

        assert_eq!(out.path, PathBuf::from("/app/pages/gen.js"));
        assert_eq!(out.source, "module.exports = require(\"/app/pages/gen.js\");");

        let content = out.fs.read_file_sync(Path::new("/app/pages/gen.js"), None).unwrap();
        assert_eq!(content, FileContent::Raw(b"hello".to_vec()));
    }

    #[test]
    fn test_load_missing_src() {
        let err = load(os_fs(), &ctx("?file=./gen.js")).unwrap_err();
        assert!(matches!(err, LoaderError::MissingParam("src")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(os_fs(), &ctx("?src=00")).unwrap_err();
        assert!(matches!(err, LoaderError::MissingParam("file")));
    }

    #[test]
    fn test_load_explicit_encoding() {
        let out = load(
            os_fs(),
            &ctx(r#"?{"src":"aGVsbG8=","file":"./gen.js","encoding":"base64"}"#),
        )
        .unwrap();
        let content = out.fs.read_file_sync(&out.path, None).unwrap();
        assert_eq!(content.as_bytes(), b"hello");
    }

    #[test]
    fn test_load_unknown_encoding() {
        let err = load(os_fs(), &ctx("?src=00&file=a.js&encoding=ebcdic")).unwrap_err();
        assert!(matches!(err, LoaderError::Encoding(EncodingError::UnknownName(_))));
    }

    #[test]
    fn test_load_malformed_payload() {
        let err = load(os_fs(), &ctx("?src=zz&file=a.js")).unwrap_err();
        assert!(matches!(err, LoaderError::Encoding(EncodingError::Hex(_))));
    }

    #[test]
    fn test_repeated_loads_share_one_overlay() {
        let first = load(os_fs(), &ctx("?src=61&file=./a.js")).unwrap();
        let second = load(first.fs.clone(), &ctx("?src=62&file=./b.js")).unwrap();

        assert!(Arc::ptr_eq(&first.fs, &second.fs));
        assert_eq!(second.fs.file_count(), 2);
        let a = second.fs.read_file_sync(Path::new("/app/pages/a.js"), None).unwrap();
        assert_eq!(a.as_bytes(), b"a");
    }

    #[test]
    fn test_stub_uses_forward_slashes() {
        assert_eq!(
            require_stub(Path::new(r"C:\app\gen.js")),
            "module.exports = require(\"C:/app/gen.js\");"
        );
    }

    #[test]
    fn test_stat_through_loaded_fs() {
        let out = load(os_fs(), &ctx("?src=616263&file=./gen.js")).unwrap();
        let stat = out.fs.stat_sync(&out.path).unwrap();
        assert_eq!(stat.size, 3);
        assert!(stat.is_file());
    }
}
