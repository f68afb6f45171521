//! Video listing and streaming routes.
//!
//! - `GET /api/v1/videos` lists every video under the media root.
//! - `GET /videos/*filepath` streams one file with range support.

use axum::{
    body::Body,
    extract::{Path, State},
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use mediago_common::{Error, PathError};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use super::error::AppError;
use super::AppContext;
use crate::video::VideoEntry;

/// Routes nested under `/api/v1`.
pub fn video_api_routes() -> Router<AppContext> {
    Router::new().route("/videos", get(list_videos))
}

/// File streaming route, mounted at the root.
pub fn video_stream_routes() -> Router<AppContext> {
    Router::new().route("/videos/*filepath", get(stream_video))
}

/// List all videos in the configured directory.
///
/// Returns an empty array when no media root is configured.
#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "videos",
    responses(
        (status = 200, description = "List of videos", body = Vec<VideoEntry>),
        (status = 500, description = "Failed to retrieve video files")
    )
)]
pub async fn list_videos(State(ctx): State<AppContext>) -> Result<Json<Vec<VideoEntry>>, AppError> {
    let Some(service) = ctx.videos.clone() else {
        return Ok(Json(Vec::new()));
    };

    // The walk is synchronous filesystem work.
    let videos = tokio::task::spawn_blocking(move || service.list_videos())
        .await
        .map_err(|e| Error::internal(format!("Video scan task failed: {e}")))??;

    Ok(Json(videos))
}

/// Stream a video file from the media root.
///
/// Range, `If-Modified-Since` and `Last-Modified` handling is delegated to
/// [`ServeFile`].
#[utoipa::path(
    get,
    path = "/videos/{filepath}",
    tag = "videos",
    params(
        ("filepath" = String, Path, description = "File path relative to the media root")
    ),
    responses(
        (status = 200, description = "Full file contents"),
        (status = 206, description = "Requested byte range"),
        (status = 400, description = "Invalid file path"),
        (status = 404, description = "File not found")
    )
)]
pub async fn stream_video(
    State(ctx): State<AppContext>,
    Path(filepath): Path<String>,
    request: Request<Body>,
) -> Result<Response, AppError> {
    let service = ctx.videos.as_ref().ok_or(PathError::NotFound)?;
    let path = service.resolve_stream_path(&filepath)?;

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => {
            tracing::debug!(path = %path.display(), "Requested video is not a file");
            return Err(PathError::NotFound.into());
        }
    }

    tracing::debug!(path = %path.display(), "Streaming video");
    match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}
