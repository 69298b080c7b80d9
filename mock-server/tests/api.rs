use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/echo")
                .header(http::header::CONTENT_TYPE, "text/plain")
                .body("hello".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.body, b"hello");
    assert_eq!(echo.header_values("content-type"), vec!["text/plain"]);
}

#[tokio::test]
async fn echo_keeps_repeated_headers_in_order() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo")
                .header("x-multi", "one")
                .header("x-other", "z")
                .header("x-multi", "two")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.header_values("x-multi"), vec!["one", "two"]);
    assert!(echo.body.is_empty());
}

// --- bytes ---

#[tokio::test]
async fn bytes_returns_every_byte_value() {
    let resp = app().oneshot(empty_request("GET", "/bytes")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/octet-stream"
    );
    let body = body_bytes(resp).await;
    assert_eq!(body.len(), 256);
    assert!(body.iter().enumerate().all(|(i, &b)| b as usize == i));
}

// --- multi ---

#[tokio::test]
async fn multi_appends_repeated_headers() {
    let resp = app().oneshot(empty_request("GET", "/multi")).await.unwrap();

    let multi: Vec<_> = resp.headers().get_all("x-multi").iter().collect();
    assert_eq!(multi, vec!["one", "two"]);
    let cookies: Vec<_> = resp.headers().get_all("set-cookie").iter().collect();
    assert_eq!(cookies, vec!["a=1", "b=2"]);
}

// --- status ---

#[tokio::test]
async fn status_returns_requested_code() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/status/418"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_bytes(resp).await, "status 418");
}

#[tokio::test]
async fn status_rejects_out_of_range_code() {
    let resp = app()
        .oneshot(empty_request("GET", "/status/42"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_rejects_non_numeric_code() {
    let resp = app()
        .oneshot(empty_request("GET", "/status/teapot"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- unknown route ---

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app()
        .oneshot(empty_request("GET", "/nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
