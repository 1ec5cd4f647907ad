//! The pipeline driven by the production client against a mock server.

use bytes::Bytes;
use fetchline::{DownloadOptions, download};
use fetchline_fetch::{FetchOptions, ReqwestClient, RetryClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, status: u16, body: &'static [u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_downloads_each_url() {
    let server = MockServer::start().await;
    serve(&server, "/a.txt", 200, b"alpha").await;
    serve(&server, "/b.txt", 200, b"beta").await;

    let urls = vec![format!("{}/a.txt", server.uri()), format!("{}/b.txt", server.uri())];
    let producer = download(ReqwestClient::new().unwrap(), urls, DownloadOptions::default().ci(true))
        .unwrap();

    let mut bodies = Vec::new();
    for artifact in producer {
        let name = artifact.name().to_string();
        bodies.push((name, artifact.into_content().bytes().await.unwrap()));
    }

    assert_eq!(
        bodies,
        vec![
            ("a.txt".to_string(), Bytes::from_static(b"alpha")),
            ("b.txt".to_string(), Bytes::from_static(b"beta")),
        ]
    );
}

#[tokio::test]
async fn test_not_found_surfaces_on_content() {
    let server = MockServer::start().await;
    serve(&server, "/missing", 404, b"").await;

    let client = RetryClient::new(ReqwestClient::new().unwrap());
    let options = DownloadOptions::default()
        .ci(true)
        .fetch(FetchOptions::default().max_retries(0));
    let artifact = download(client, format!("{}/missing", server.uri()), options)
        .unwrap()
        .next()
        .unwrap();

    let err = artifact.into_content().bytes().await.unwrap_err();
    assert_eq!(err.failure.status_code(), Some(404));
}
