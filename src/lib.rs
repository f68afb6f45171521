//! MediaGo Player - local video library server
//!
//! Lists and streams the videos under a media root and serves the web
//! player UI. This library crate exposes the core functionality for
//! integration testing.

pub mod assets;
pub mod config;
pub mod server;
pub mod video;
