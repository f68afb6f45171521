//! OpenAPI documentation and Swagger UI integration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::AppContext;

/// OpenAPI documentation for the player backend.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MediaGo Player API",
        version = "1.0",
        description = "MediaGo Player backend API for listing and streaming video files",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "/", description = "Default server")
    ),
    paths(
        super::routes_video::list_videos,
        super::routes_video::stream_video,
    ),
    components(schemas(crate::video::VideoEntry)),
    tags(
        (name = "videos", description = "Video listing and streaming"),
    )
)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes.
/// - `/docs` - Swagger UI
/// - `/docs/openapi.json` - Raw OpenAPI JSON document
pub fn openapi_routes() -> Router<AppContext> {
    Router::new().merge(SwaggerUi::new("/docs").url("/docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_video_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/videos"));
        assert!(doc.paths.paths.contains_key("/videos/{filepath}"));
    }
}
