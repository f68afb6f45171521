//! Read-only asset trees and the SPA resolver built on top of them.
//!
//! An [`AssetTree`] is an explicit handle to an immutable file tree. The
//! resolver never touches the filesystem directly; it only reads keys out of
//! the tree it was constructed with. Three trees are provided:
//!
//! - [`EmbeddedTree`]: files compiled into the binary with `rust-embed`
//! - [`DirTree`]: a directory on disk, opened read-only
//! - [`MemoryTree`]: an in-memory map, used by tests

mod spa;

pub use spa::{Resolution, ResolvedAsset, SpaChain, SpaMount, DEFAULT_INDEX_FILE};

use std::collections::HashMap;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;

use bytes::Bytes;
use rust_embed::RustEmbed;

/// Pre-built web UI, compiled into the binary. The SPA lives under `ui/`.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct UiAssets;

/// Subdirectory of [`UiAssets`] holding the SPA build output.
pub const UI_ROOT: &str = "ui";

/// A read-only file tree addressed by slash-separated relative keys.
pub trait AssetTree: Send + Sync {
    /// Read the full contents of the file at `path`.
    ///
    /// Keys never start with `/`. Any error means "absent" to the resolver.
    fn read(&self, path: &str) -> io::Result<Bytes>;
}

/// Rejects keys that could name something outside the tree.
fn validate_key(path: &str) -> io::Result<()> {
    let escapes = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|segment| segment == "..");

    if escapes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid asset key: {path:?}"),
        ));
    }
    Ok(())
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("asset not found: {path}"))
}

// ---------------------------------------------------------------------------
// EmbeddedTree
// ---------------------------------------------------------------------------

/// Assets compiled into the binary.
pub struct EmbeddedTree<E> {
    _assets: PhantomData<fn() -> E>,
}

impl<E: RustEmbed> EmbeddedTree<E> {
    pub fn new() -> Self {
        Self {
            _assets: PhantomData,
        }
    }
}

impl<E: RustEmbed> Default for EmbeddedTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RustEmbed> AssetTree for EmbeddedTree<E> {
    fn read(&self, path: &str) -> io::Result<Bytes> {
        validate_key(path)?;
        let file = E::get(path).ok_or_else(|| not_found(path))?;
        Ok(match file.data {
            std::borrow::Cow::Borrowed(data) => Bytes::from_static(data),
            std::borrow::Cow::Owned(data) => Bytes::from(data),
        })
    }
}

// ---------------------------------------------------------------------------
// DirTree
// ---------------------------------------------------------------------------

/// A directory on disk, served read-only.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
}

impl DirTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetTree for DirTree {
    fn read(&self, path: &str) -> io::Result<Bytes> {
        validate_key(path)?;
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(not_found(path));
        }
        std::fs::read(full).map(Bytes::from)
    }
}

// ---------------------------------------------------------------------------
// MemoryTree
// ---------------------------------------------------------------------------

/// An in-memory tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: HashMap<String, Bytes>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous contents at `path`.
    pub fn with_file(mut self, path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.files.insert(path.into(), data.into());
        self
    }
}

impl AssetTree for MemoryTree {
    fn read(&self, path: &str) -> io::Result<Bytes> {
        validate_key(path)?;
        self.files.get(path).cloned().ok_or_else(|| not_found(path))
    }
}
