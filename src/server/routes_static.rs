//! Last-resort handler: the SPA mount chain, then a JSON 404.

use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;

use super::error::not_found;
use super::AppContext;
use crate::assets::Resolution;

/// Offer the decoded request path to each mount in order.
pub async fn spa_fallback(State(ctx): State<AppContext>, uri: Uri) -> Response {
    let path = decode_path(uri.path());
    let assets = ctx.assets.clone();

    // Disk-backed mounts read synchronously.
    let resolution = match tokio::task::spawn_blocking(move || assets.resolve(&path)).await {
        Ok(resolution) => resolution,
        Err(e) => {
            tracing::error!("Asset resolution task failed: {e}");
            Resolution::Declined
        }
    };

    match resolution {
        Resolution::Handled(asset) => asset.into_response(),
        Resolution::Declined => not_found(),
    }
}

/// Percent-decode a request path. Paths that do not decode to UTF-8 are kept
/// as sent.
fn decode_path(raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_escaped_segments() {
        assert_eq!(decode_path("/assets/my%20file.js"), "/assets/my file.js");
        assert_eq!(decode_path("/%E6%97%A5%E6%9C%AC.css"), "/日本.css");
        assert_eq!(decode_path("/plain/path"), "/plain/path");
    }

    #[test]
    fn invalid_utf8_is_kept_raw() {
        assert_eq!(decode_path("/bad%FF.js"), "/bad%FF.js");
    }
}
