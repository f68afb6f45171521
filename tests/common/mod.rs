//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which lays out an optional temporary media root,
//! an in-memory UI mount chain, and a full [`AppContext`]. The
//! [`TestHarness::spawn`] method starts Axum on a random port for HTTP-level
//! testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tempfile::TempDir;

use mediago_player::assets::{MemoryTree, SpaChain, SpaMount};
use mediago_player::config::Config;
use mediago_player::server::{create_router, AppContext, EXCLUDED_PREFIXES};

/// Minimal HTML used as the SPA index in tests.
pub const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"root\"></div></body></html>";

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
    /// Kept alive for the lifetime of the harness.
    pub media: Option<TempDir>,
}

impl TestHarness {
    /// Harness with no media root configured.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Harness with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let ctx = AppContext::new(config, "127.0.0.1:0", test_mounts());
        Self { ctx, media: None }
    }

    /// Harness whose media root is a fresh temp dir holding `files`.
    pub fn with_media(files: &[(&str, &[u8])]) -> Self {
        let dir = tempfile::tempdir().expect("failed to create media dir");
        for (rel, data) in files {
            write_file(dir.path(), rel, data);
        }

        let mut config = Config::default();
        config.video.root_path = Some(dir.path().to_path_buf());

        let mut harness = Self::with_config(config);
        harness.media = Some(dir);
        harness
    }

    /// Router for in-process `oneshot` requests.
    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn spawn(self) -> (Self, SocketAddr) {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (self, addr)
    }
}

/// UI mounts backed by memory instead of the embedded build.
pub fn test_mounts() -> SpaChain {
    let tree = MemoryTree::new()
        .with_file("index.html", INDEX_HTML)
        .with_file("assets/app.js", "console.log('player')")
        .with_file("app.wasm", &b"\0asm\x01\0\0\0"[..])
        .with_file("api/anything", "should never be served");

    SpaChain::new(vec![
        SpaMount::new(tree).with_exclude_prefixes(EXCLUDED_PREFIXES)
    ])
}

pub fn write_file(root: &Path, rel: &str, data: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    std::fs::write(path, data).expect("failed to write test file");
}
