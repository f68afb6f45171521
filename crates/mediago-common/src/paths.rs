//! Path utilities shared by the asset resolver and the video index.
//!
//! - [`clean`] normalizes URL-style paths lexically, without touching the
//!   filesystem.
//! - [`escape_path_segment`] percent-encodes a file name for use as a single
//!   URL path segment.
//! - [`is_video_file`] classifies a path by its extension's MIME type.

use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::content_type;

/// Bytes left unescaped inside a path segment: the unreserved marks plus the
/// sub-delimiters that are legal in a segment. `/`, `;`, `,` and `?` are
/// always escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Lexically normalize a slash-separated path.
///
/// Collapses duplicate separators, drops `.` elements, and resolves `..`
/// against the preceding element. A `..` at the start of a rooted path is
/// dropped; in a relative path it is kept. The empty result is `"."`.
///
/// # Examples
///
/// ```
/// use mediago_common::paths::clean;
///
/// assert_eq!(clean("/a//b/./c/.."), "/a/b");
/// assert_eq!(clean("/../etc/passwd"), "/etc/passwd");
/// assert_eq!(clean(""), ".");
/// ```
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Percent-encode `segment` so it can be placed inside a single URL path
/// segment.
///
/// # Examples
///
/// ```
/// use mediago_common::paths::escape_path_segment;
///
/// assert_eq!(escape_path_segment("my movie.mp4"), "my%20movie.mp4");
/// assert_eq!(escape_path_segment("a/b"), "a%2Fb");
/// ```
pub fn escape_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Check whether a path has an extension registered as a `video/*` type.
///
/// Only the name is inspected; the file is never opened.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mediago_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("movie.mkv")));
/// assert!(is_video_file(Path::new("/path/to/video.mp4")));
/// assert!(!is_video_file(Path::new("notes.txt")));
/// assert!(is_video_file(Path::new(".mp4")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    content_type::type_by_extension(content_type::extension(&name.to_string_lossy()))
        .is_some_and(|mime| mime.starts_with("video/"))
}
