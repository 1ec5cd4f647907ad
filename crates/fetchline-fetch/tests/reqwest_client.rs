//! `ReqwestClient` against a local mock server.

#![cfg(feature = "reqwest")]

use fetchline_fetch::{FetchError, FetchOptions, HttpClient, ReqwestClient};
use futures_util::TryStreamExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn body_of(response: fetchline_fetch::Response<FetchError>) -> Vec<u8> {
    response
        .body
        .try_fold(Vec::new(), |mut acc, chunk| async move {
            acc.extend_from_slice(&chunk);
            Ok(acc)
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_streams_body_and_content_length() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello world".to_vec()))
        .mount(&server)
        .await;

    let client = ReqwestClient::new().unwrap();
    let response = client
        .get(&format!("{}/a.txt", server.uri()), &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.headers.content_length(), Some("11"));
    assert_eq!(body_of(response).await, b"hello world");
}

#[tokio::test]
async fn test_failure_status_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let client = ReqwestClient::new().unwrap();
    let response = client
        .get(&format!("{}/missing", server.uri()), &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(response.is_failure());
    assert_eq!(body_of(response).await, b"not here");
}

#[tokio::test]
async fn test_forwards_custom_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
        .mount(&server)
        .await;

    let client = ReqwestClient::new().unwrap();
    let options = FetchOptions::default().header("Authorization", "Bearer token");
    let response = client
        .get(&format!("{}/private", server.uri()), &options)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
        .mount(&server)
        .await;

    let client = ReqwestClient::new().unwrap();
    let response = client
        .get(&format!("{}/old", server.uri()), &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(body_of(response).await, b"moved");
}

#[tokio::test]
async fn test_redirect_loop_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/loop", server.uri())),
        )
        .mount(&server)
        .await;

    let options = FetchOptions::default().max_redirects(3);
    let client = ReqwestClient::with_options(&options).unwrap();
    let err = client
        .get(&format!("{}/loop", server.uri()), &options)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::TooManyRedirects { max: 3 }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_invalid_header_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ReqwestClient::new().unwrap();
    for options in [
        FetchOptions::default().header("X-Token", "line\nbreak"),
        FetchOptions::default().header("bad header", "value"),
    ] {
        let err = client
            .get(&format!("{}/a.txt", server.uri()), &options)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::InvalidHeader { .. }), "{err}");
        assert!(!err.is_transient());
    }
}
