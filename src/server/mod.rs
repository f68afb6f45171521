use crate::assets::{DirTree, EmbeddedTree, SpaChain, SpaMount, UiAssets, UI_ROOT};
use crate::config::Config;
use crate::video::VideoService;
use anyhow::{Context, Result};
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod openapi;
pub mod request_id;
pub mod routes_static;
pub mod routes_video;

/// Request paths the SPA mounts never answer.
pub const EXCLUDED_PREFIXES: [&str; 4] = ["/api/", "/healthy", "/docs", "/videos/"];

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Absent when no usable media root is configured
    pub videos: Option<Arc<VideoService>>,
    /// Static UI mounts, tried in order
    pub assets: Arc<SpaChain>,
}

impl AppContext {
    /// Build the context, opening the media root if one is configured.
    ///
    /// A bad media root is logged and leaves the video API answering `[]`.
    pub fn new(config: Config, server_addr: &str, assets: SpaChain) -> Self {
        let videos = match &config.video.root_path {
            Some(root) => match VideoService::new(root.clone(), server_addr) {
                Ok(service) => Some(Arc::new(service)),
                Err(e) => {
                    tracing::warn!("Video service disabled: {}", e);
                    None
                }
            },
            None => {
                tracing::info!("No video root configured, video API will return an empty list");
                None
            }
        };

        Self {
            config: Arc::new(config),
            videos,
            assets: Arc::new(assets),
        }
    }
}

/// Default UI mounts: an on-disk `static_dir` first, then the embedded build.
pub fn default_mounts(config: &Config) -> SpaChain {
    let mut chain = SpaChain::default();

    if let Some(dir) = &config.server.static_dir {
        if dir.is_dir() {
            tracing::info!("Serving static files from {:?}", dir);
            chain.push(SpaMount::new(DirTree::new(dir)).with_exclude_prefixes(EXCLUDED_PREFIXES));
        } else {
            tracing::warn!("Static directory {:?} not found, using embedded UI", dir);
        }
    }

    chain.push(
        SpaMount::new(EmbeddedTree::<UiAssets>::new())
            .with_root(UI_ROOT)
            .with_exclude_prefixes(EXCLUDED_PREFIXES),
    );

    chain
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        // Health check
        .route("/healthy", get(health_check))
        .nest("/api/v1", routes_video::video_api_routes());

    if ctx.videos.is_some() {
        app = app.merge(routes_video::video_stream_routes());
        tracing::info!("Video streaming routes enabled");
    }

    if ctx.config.server.enable_docs {
        app = app.merge(openapi::openapi_routes());
        tracing::info!("API docs available at /docs");
    }

    app.fallback(routes_static::spa_fallback)
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> &'static str {
    "ok"
}

/// Start the HTTP server on `addr` and run until Ctrl+C or SIGTERM.
pub async fn start_server(config: Config, addr: String) -> Result<()> {
    let assets = default_mounts(&config);
    let ctx = AppContext::new(config, &addr, assets);
    let app = create_router(ctx);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
