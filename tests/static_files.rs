//! Static file fallback through the running proxy.

use std::fs;

use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use reqwest::StatusCode;

mod common;

use common::{closed_port, config_for, start_proxy};

#[tokio::test]
async fn root_serves_index_html() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("index.html"), "<!doctype html><title>Rides</title>").unwrap();
    let proxy = start_proxy(config_for(closed_port().await, root.path())).await;

    let res = proxy.client.get(proxy.url("/")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);
    assert!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    assert_eq!(res.text().await.unwrap(), "<!doctype html><title>Rides</title>");
}

#[tokio::test]
async fn serves_nested_assets_with_query_string() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("css")).unwrap();
    fs::write(root.path().join("css").join("app.css"), "body{margin:0}").unwrap();
    let proxy = start_proxy(config_for(closed_port().await, root.path())).await;

    let res = proxy
        .client
        .get(proxy.url("/css/app.css?v=3"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/css"));
    assert_eq!(res.text().await.unwrap(), "body{margin:0}");
}

#[tokio::test]
async fn missing_file_is_404() {
    let root = tempfile::tempdir().unwrap();
    let proxy = start_proxy(config_for(closed_port().await, root.path())).await;

    let res = proxy.client.get(proxy.url("/nope.js")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_on_auth_prefix_falls_through_to_static() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("strava-auth")).unwrap();
    fs::write(root.path().join("strava-auth").join("callback.html"), "ok").unwrap();
    let proxy = start_proxy(config_for(closed_port().await, root.path())).await;

    let res = proxy
        .client
        .get(proxy.url("/strava-auth/callback.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn head_is_served_without_body() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("index.html"), "<p>hi</p>").unwrap();
    let proxy = start_proxy(config_for(closed_port().await, root.path())).await;

    let res = proxy.client.head(proxy.url("/index.html")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn directory_without_index_is_listed() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("data")).unwrap();
    fs::write(root.path().join("data").join("a.json"), "{}").unwrap();
    let proxy = start_proxy(config_for(closed_port().await, root.path())).await;

    let res = proxy.client.get(proxy.url("/data/")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    assert!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    let html = res.text().await.unwrap();
    assert!(html.contains("Directory listing for /data/"), "{}", html);
    assert!(html.contains(r#"<a href="a.json">a.json</a>"#), "{}", html);
}

#[tokio::test]
async fn directory_with_index_is_not_listed() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("app")).unwrap();
    fs::write(root.path().join("app").join("index.html"), "<p>app</p>").unwrap();
    let proxy = start_proxy(config_for(closed_port().await, root.path())).await;

    let res = proxy.client.get(proxy.url("/app/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "<p>app</p>");
}
