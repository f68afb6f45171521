//! Media directory index.
//!
//! [`VideoService`] owns the configured media root. Every listing walks the
//! directory tree from scratch; nothing is cached between requests.

mod stream;

pub use stream::resolve_stream_path;

use std::path::{Path, PathBuf};

use mediago_common::paths::{escape_path_segment, is_video_file};
use mediago_common::{Error, PathError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;
use walkdir::WalkDir;

/// URL prefix under which video files are streamed.
pub const VIDEO_URL_PREFIX: &str = "videos/";

/// Port reported in diagnostics when the server address has none.
const DEFAULT_PORT: &str = "8080";

/// A playable video found under the media root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct VideoEntry {
    /// File base name, including the extension.
    pub title: String,
    /// Root-relative streaming URL, e.g. `videos/my%20movie.mp4`.
    pub url: String,
}

impl VideoEntry {
    /// Build an entry for a video file, or `None` if the path has no name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let title = path.file_name()?.to_string_lossy().into_owned();
        let url = format!("{VIDEO_URL_PREFIX}{}", escape_path_segment(&title));
        Some(Self { title, url })
    }
}

/// Scans and serves videos from a single media root.
#[derive(Debug, Clone)]
pub struct VideoService {
    root: PathBuf,
}

impl VideoService {
    /// Create a service for `root`.
    ///
    /// Fails with [`Error::Config`] if the root is empty or does not exist.
    /// `server_addr` is only used to report the port in diagnostics.
    pub fn new(root: impl Into<PathBuf>, server_addr: &str) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(Error::config("video directory not configured"));
        }
        if !root.exists() {
            return Err(Error::config(format!(
                "video directory does not exist: {}",
                root.display()
            )));
        }

        info!(
            root = %root.display(),
            port = port_from_addr(server_addr),
            "Video library ready"
        );

        Ok(Self { root })
    }

    /// Lazily walk the media root, yielding one entry per video file.
    ///
    /// Directories are descended into but never yielded. Entries come out in
    /// file-name order within each directory, so an unchanged tree always
    /// produces the same sequence.
    pub fn scan(&self) -> impl Iterator<Item = Result<VideoEntry>> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(Error::scan(&self.root, e.into()))),
                };
                if entry.file_type().is_dir() || !is_video_file(entry.path()) {
                    return None;
                }
                VideoEntry::from_path(entry.path()).map(Ok)
            })
    }

    /// Materialize the full listing. Any walk error fails the whole listing.
    pub fn list_videos(&self) -> Result<Vec<VideoEntry>> {
        let videos = self.scan().collect::<Result<Vec<_>>>()?;
        debug!(
            root = %self.root.display(),
            count = videos.len(),
            "Scanned video directory"
        );
        Ok(videos)
    }

    /// Validate a client-supplied path and resolve it under the media root.
    pub fn resolve_stream_path(&self, requested: &str) -> std::result::Result<PathBuf, PathError> {
        resolve_stream_path(&self.root, requested)
    }
}

/// Port portion of a server address such as `0.0.0.0:8080` or `:9000`.
pub fn port_from_addr(addr: &str) -> &str {
    let port = match addr.rfind(':') {
        Some(idx) => &addr[idx + 1..],
        None => addr,
    };
    if port.is_empty() {
        DEFAULT_PORT
    } else {
        port
    }
}
