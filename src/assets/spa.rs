//! Single-page application file resolver.
//!
//! A [`SpaMount`] maps request paths onto an [`AssetTree`]. Paths that match
//! no file are answered with the index document so the client-side router
//! can take over. A mount never raises an error: it either handles the
//! request or declines it so the next handler can run.
//!
//! Resolution order for one mount:
//!
//! 1. Excluded prefixes are checked against the original request path.
//! 2. The mount's URL prefix is required and stripped.
//! 3. The remainder is cleaned lexically; the root maps to the index file.
//! 4. The file is read, falling back to the index file when absent.
//! 5. The content type is resolved from the file actually served.

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use mediago_common::{content_type, paths};

use super::AssetTree;

/// Index document served for the root and for unmatched paths.
pub const DEFAULT_INDEX_FILE: &str = "index.html";

/// A file read from a mount, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// Tree-relative path of the file that was served.
    pub path: String,
    pub bytes: Bytes,
    pub content_type: String,
}

impl IntoResponse for ResolvedAsset {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, self.content_type)],
            self.bytes,
        )
            .into_response()
    }
}

/// Outcome of offering a request path to a mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The mount served the request; no further handler should run.
    Handled(ResolvedAsset),
    /// The mount does not apply; the next handler should run.
    Declined,
}

/// A registered asset tree plus its URL prefix and exclusion rules.
///
/// Immutable once built.
#[derive(Clone)]
pub struct SpaMount {
    tree: Arc<dyn AssetTree>,
    root: String,
    path_prefix: String,
    index_file: String,
    exclude_prefixes: Vec<String>,
}

impl std::fmt::Debug for SpaMount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpaMount")
            .field("root", &self.root)
            .field("path_prefix", &self.path_prefix)
            .field("index_file", &self.index_file)
            .field("exclude_prefixes", &self.exclude_prefixes)
            .finish_non_exhaustive()
    }
}

impl SpaMount {
    /// Mount `tree` at the URL root, serving `index.html` as the fallback.
    pub fn new(tree: impl AssetTree + 'static) -> Self {
        Self {
            tree: Arc::new(tree),
            root: String::new(),
            path_prefix: String::new(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            exclude_prefixes: Vec::new(),
        }
    }

    /// Serve files from this subdirectory of the tree (e.g. `ui`).
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into().trim_matches('/').to_string();
        self
    }

    /// Only handle requests under this URL prefix (e.g. `/m`).
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// Use a different fallback document. An empty name keeps the default.
    pub fn with_index_file(mut self, index_file: impl Into<String>) -> Self {
        let index_file = index_file.into();
        if !index_file.is_empty() {
            self.index_file = index_file;
        }
        self
    }

    /// Decline requests starting with any of these prefixes.
    pub fn with_exclude_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Resolve a request path against this mount.
    pub fn resolve(&self, request_path: &str) -> Resolution {
        if self.is_excluded(request_path) {
            return Resolution::Declined;
        }

        let path = if self.path_prefix.is_empty() {
            request_path
        } else {
            match request_path.strip_prefix(self.path_prefix.as_str()) {
                Some(rest) => rest,
                None => return Resolution::Declined,
            }
        };

        let cleaned = paths::clean(path);
        let key = if cleaned == "." || cleaned == "/" {
            self.index_file.clone()
        } else {
            cleaned.trim_start_matches('/').to_string()
        };

        let (served, bytes) = match self.read(&key) {
            Some(bytes) => (key, bytes),
            None => match self.read(&self.index_file) {
                Some(bytes) => (self.index_file.clone(), bytes),
                None => {
                    tracing::debug!(
                        path = request_path,
                        root = %self.root,
                        "Neither asset nor index file found"
                    );
                    return Resolution::Declined;
                }
            },
        };

        let content_type = content_type::resolve(&served, &bytes);
        Resolution::Handled(ResolvedAsset {
            path: served,
            bytes,
            content_type,
        })
    }

    /// Exclusions apply to the original path, before the prefix is stripped.
    fn is_excluded(&self, request_path: &str) -> bool {
        self.exclude_prefixes.iter().any(|prefix| {
            request_path.starts_with(prefix.as_str())
                || request_path == prefix.strip_suffix('/').unwrap_or(prefix)
        })
    }

    fn read(&self, key: &str) -> Option<Bytes> {
        let full_key = if self.root.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.root, key)
        };
        self.tree.read(&full_key).ok()
    }
}

/// Mounts tried in registration order; the first that handles wins.
#[derive(Debug, Clone, Default)]
pub struct SpaChain {
    mounts: Vec<SpaMount>,
}

impl SpaChain {
    pub fn new(mounts: Vec<SpaMount>) -> Self {
        Self { mounts }
    }

    pub fn push(&mut self, mount: SpaMount) {
        self.mounts.push(mount);
    }

    pub fn mounts(&self) -> &[SpaMount] {
        &self.mounts
    }

    pub fn resolve(&self, request_path: &str) -> Resolution {
        self.mounts
            .iter()
            .map(|mount| mount.resolve(request_path))
            .find(|resolution| matches!(resolution, Resolution::Handled(_)))
            .unwrap_or(Resolution::Declined)
    }
}
