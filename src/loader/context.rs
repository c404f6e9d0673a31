//! Build-context path resolution.
//!
//! A relative target path must resolve the way a real sibling file would:
//! against the directory of whichever module pulled the virtual file in.
//! The bundler exposes that position as the module's incoming *reasons*
//! (requests that brought it into the graph) and, failing those, the
//! `!`-separated *issuer* request chain.

use std::path::{Path, PathBuf};

use crate::fs::normalize_path;

/// The loader's position in the host bundler's build.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Raw loader query string.
    pub query: String,
    /// Module-graph position, when the bundler provides one.
    pub module: Option<ModuleGraphNode>,
}

/// Module-graph information for the module being loaded.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraphNode {
    /// Resource paths of the modules that requested this one, oldest first.
    pub reasons: Vec<PathBuf>,
    /// The importing module's request chain, segments separated by `!`
    /// (loaders first, resource last).
    pub issuer: String,
}

/// Directory against which a relative target path resolves.
///
/// The most recent reason's resource directory wins; without reasons, the
/// resource at the tail of the issuer chain is used.
pub fn resolve_context_dir(node: &ModuleGraphNode) -> PathBuf {
    if let Some(resource) = node.reasons.last() {
        return parent_dir(resource);
    }
    let resource = node.issuer.split('!').next_back().unwrap_or("");
    parent_dir(Path::new(resource))
}

/// Resolve the loader's target path within the build context.
///
/// With module-graph information the path is resolved against
/// [`resolve_context_dir`] and normalized to absolute form; without it the
/// path is used as spelled. An absolute `file` ignores the context directory
/// either way.
pub fn resolve_file(ctx: &BuildContext, file: &Path) -> PathBuf {
    match &ctx.module {
        // join() discards the base when `file` is absolute.
        Some(node) => normalize_path(&resolve_context_dir(node).join(file)),
        None => file.to_path_buf(),
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(node: ModuleGraphNode) -> BuildContext {
        BuildContext { query: String::new(), module: Some(node) }
    }

    #[test]
    fn test_no_module_info_uses_path_as_spelled() {
        let ctx = BuildContext::default();
        assert_eq!(resolve_file(&ctx, Path::new("./gen.js")), PathBuf::from("./gen.js"));
    }

    #[test]
    fn test_last_reason_wins() {
        let node = ModuleGraphNode {
            reasons: vec![PathBuf::from("/old/entry.js"), PathBuf::from("/app/pages/index.js")],
            issuer: "/ignored/issuer.js".to_string(),
        };
        assert_eq!(resolve_context_dir(&node), PathBuf::from("/app/pages"));

        let resolved = resolve_file(&ctx_with(node), Path::new("./gen.js"));
        assert_eq!(resolved, PathBuf::from("/app/pages/gen.js"));
    }

    #[test]
    fn test_issuer_chain_fallback() {
        let node = ModuleGraphNode {
            reasons: vec![],
            issuer: "style-loader!css-loader!/app/styles/main.css".to_string(),
        };
        assert_eq!(resolve_context_dir(&node), PathBuf::from("/app/styles"));
    }

    #[test]
    fn test_issuer_without_loaders() {
        let node = ModuleGraphNode {
            reasons: vec![],
            issuer: "/app/entry.js".to_string(),
        };
        assert_eq!(resolve_context_dir(&node), PathBuf::from("/app"));
    }

    #[test]
    fn test_empty_issuer_resolves_against_cwd() {
        let node = ModuleGraphNode::default();
        let resolved = resolve_file(&ctx_with(node), Path::new("gen.js"));
        assert_eq!(resolved, std::env::current_dir().unwrap().join("gen.js"));
    }

    #[test]
    fn test_absolute_file_ignores_context() {
        let node = ModuleGraphNode {
            reasons: vec![PathBuf::from("/app/pages/index.js")],
            issuer: String::new(),
        };
        let resolved = resolve_file(&ctx_with(node), Path::new("/abs/gen.js"));
        assert_eq!(resolved, PathBuf::from("/abs/gen.js"));
    }

    #[test]
    fn test_relative_segments_normalized() {
        let node = ModuleGraphNode {
            reasons: vec![PathBuf::from("/app/pages/index.js")],
            issuer: String::new(),
        };
        let resolved = resolve_file(&ctx_with(node), Path::new("../shared/gen.js"));
        assert_eq!(resolved, PathBuf::from("/app/shared/gen.js"));
    }
}
