//! Access guard for streamed video paths.

use std::path::{Path, PathBuf};

use mediago_common::PathError;

/// The parent-directory token. Any occurrence in a requested path is refused.
const TRAVERSAL_TOKEN: &str = "..";

/// Resolve `requested` (everything after `/videos/`) to an absolute path
/// under `root`.
///
/// The traversal check runs on the raw string before it is joined to the
/// root. Whether the file exists is left to the caller.
pub fn resolve_stream_path(root: &Path, requested: &str) -> Result<PathBuf, PathError> {
    let requested = requested.strip_prefix('/').unwrap_or(requested);

    if requested.contains(TRAVERSAL_TOKEN) {
        tracing::warn!(path = requested, "Rejected stream path with traversal token");
        return Err(PathError::BadRequest);
    }

    std::path::absolute(root.join(requested)).map_err(|e| {
        tracing::debug!(path = requested, error = %e, "Failed to resolve stream path");
        PathError::NotFound
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_path_resolves_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_stream_path(dir.path(), "a/b/video.mp4").unwrap();
        assert_eq!(resolved, dir.path().join("a/b/video.mp4"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn single_leading_separator_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_stream_path(dir.path(), "/movie.mp4").unwrap();
        assert_eq!(resolved, dir.path().join("movie.mp4"));
    }

    #[test]
    fn traversal_token_is_rejected_anywhere() {
        let dir = tempfile::tempdir().unwrap();
        for path in [
            "../etc/passwd",
            "/../etc/passwd",
            "a/../../b.mp4",
            "a/..",
            "name..mp4",
            "..hidden.mkv",
        ] {
            assert_eq!(
                resolve_stream_path(dir.path(), path),
                Err(PathError::BadRequest),
                "{path}"
            );
        }
    }

    #[test]
    fn relative_root_becomes_absolute() {
        let resolved = resolve_stream_path(Path::new("media"), "clip.webm").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("media/clip.webm"));
    }

    #[test]
    fn single_dots_are_allowed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_stream_path(dir.path(), "./movie.mp4").is_ok());
        assert!(resolve_stream_path(dir.path(), "movie.v2.mp4").is_ok());
    }
}
