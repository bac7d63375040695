//! HTTP media fetcher tests against a local mock server.

use sp_core::ports::{FetchError, MediaFetcherPort};
use sp_infra::HttpMediaFetcher;

#[tokio::test]
async fn fetch_returns_bytes_and_mime() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/img/hero.png")
        .with_status(200)
        .with_header("content-type", "image/png; charset=binary")
        .with_body(vec![0x89, 0x50, 0x4e, 0x47])
        .create_async()
        .await;

    let fetcher = HttpMediaFetcher::new(None).unwrap();
    let blob = fetcher
        .fetch(&format!("{}/img/hero.png", server.url()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(blob.bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    assert_eq!(blob.mime.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/missing.webp")
        .with_status(404)
        .create_async()
        .await;

    let fetcher = HttpMediaFetcher::new(None).unwrap();
    let err = fetcher
        .fetch(&format!("{}/missing.webp", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(404)));
}

#[tokio::test]
async fn relative_url_resolves_against_base() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/videos/aftermovie.mp4")
        .with_status(200)
        .with_body("video")
        .create_async()
        .await;

    let fetcher = HttpMediaFetcher::new(None)
        .unwrap()
        .with_base_url(&server.url())
        .unwrap();
    let blob = fetcher.fetch("/videos/aftermovie.mp4").await.unwrap();

    mock.assert_async().await;
    assert_eq!(blob.bytes, b"video".to_vec());
}

#[tokio::test]
async fn relative_url_without_base_fails_fast() {
    let fetcher = HttpMediaFetcher::new(None).unwrap();
    let err = fetcher.fetch("/img/logo.png").await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}
