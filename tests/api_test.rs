//! Integration tests for the health check and video listing API.

mod common;

use common::TestHarness;
use mediago_player::config::Config;
use serde_json::{json, Value};

#[tokio::test]
async fn healthy_returns_ok() {
    let (_harness, addr) = TestHarness::new().spawn().await;

    let resp = reqwest::get(format!("http://{addr}/healthy")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn list_videos_skips_non_videos() {
    let (_harness, addr) = TestHarness::with_media(&[
        ("movie.mp4", b"\x00\x00\x00\x18ftypisom"),
        ("notes.txt", b"not a video"),
    ])
    .spawn()
    .await;

    let resp = reqwest::get(format!("http://{addr}/api/v1/videos")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([{ "title": "movie.mp4", "url": "videos/movie.mp4" }]));
}

#[tokio::test]
async fn list_videos_escapes_urls_and_descends() {
    let (_harness, addr) = TestHarness::with_media(&[
        ("show/season 1/ep 1.mkv", b"x"),
        ("show/poster.jpg", b"x"),
    ])
    .spawn()
    .await;

    let body: Value = reqwest::get(format!("http://{addr}/api/v1/videos"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!([{ "title": "ep 1.mkv", "url": "videos/ep%201.mkv" }]));
}

#[tokio::test]
async fn list_videos_without_root_is_empty() {
    let (_harness, addr) = TestHarness::new().spawn().await;

    let resp = reqwest::get(format!("http://{addr}/api/v1/videos")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn list_videos_with_missing_root_is_empty() {
    let mut config = Config::default();
    config.video.root_path = Some("/nonexistent/mediago/videos".into());
    let (harness, addr) = TestHarness::with_config(config).spawn().await;
    assert!(harness.ctx.videos.is_none());

    let resp = reqwest::get(format!("http://{addr}/api/v1/videos")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn list_videos_fails_when_root_disappears() {
    let harness = TestHarness::with_media(&[("a.mp4", b"x")]);
    let root = harness.media.as_ref().unwrap().path().to_path_buf();
    let (_harness, addr) = harness.spawn().await;

    std::fs::remove_dir_all(&root).unwrap();

    let resp = reqwest::get(format!("http://{addr}/api/v1/videos")).await.unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to retrieve video files");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (_harness, addr) = TestHarness::new().spawn().await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/healthy"))
        .header("x-request-id", "test-123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "test-123");

    let resp = reqwest::get(format!("http://{addr}/healthy")).await.unwrap();
    assert!(!resp.headers()["x-request-id"].is_empty());
}
