//! Mediago-Common: Shared types and utilities.
//!
//! This crate provides functionality used across the mediago server:
//!
//! - **Error Handling**: The error taxonomy shared by the video and asset layers
//! - **Content Types**: MIME resolution from file names with a content-sniffing fallback
//! - **Path Utilities**: Lexical path cleaning, URL segment escaping, and video detection
//!
//! # Examples
//!
//! ```
//! use mediago_common::content_type::resolve;
//! use mediago_common::paths::{clean, is_video_file};
//! use std::path::Path;
//!
//! assert_eq!(resolve("index.html", b""), "text/html; charset=utf-8");
//! assert_eq!(clean("/a/./b/../c"), "/a/c");
//! assert!(is_video_file(Path::new("movie.mkv")));
//! ```

pub mod content_type;
pub mod error;
pub mod paths;

pub use error::{Error, PathError, Result};
