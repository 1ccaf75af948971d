#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use bookstore_app::App;
use bookstore_kernel::settings::{DatabaseSettings, SeedSettings, Settings};
use tower::ServiceExt;

/// Settings for an isolated in-memory store.
pub fn memory_settings(seed: bool) -> Settings {
    Settings {
        database: DatabaseSettings::in_memory(),
        seed: SeedSettings { enabled: seed },
        ..Settings::default()
    }
}

/// Settings for a file store at `path`.
pub fn file_settings(path: &std::path::Path) -> Settings {
    Settings {
        database: DatabaseSettings {
            url: format!("sqlite://{}", path.display()),
            ..DatabaseSettings::default()
        },
        ..Settings::default()
    }
}

/// A fully bootstrapped app on an empty in-memory store.
pub async fn empty_app() -> App {
    App::bootstrap(memory_settings(false)).await.unwrap()
}

/// Send one request through the router and decode the JSON response.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Send a raw body with a JSON content type.
pub async fn send_raw(router: &Router, method: Method, uri: &str, body: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    router.clone().oneshot(request).await.unwrap().status()
}
