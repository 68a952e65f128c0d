//! HTTP client tests against a one-shot local server.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use weekplan::config::Config;
use weekplan::error::Error;
use weekplan::places::{PlaceSearch, PlacesClient};

/// Serve exactly one response, handing back the raw request head.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/textsearch/json", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    (url, handle)
}

fn client_for(url: &str) -> PlacesClient {
    let mut config = Config::default();
    config.places_base_url = url.to_string();
    PlacesClient::new(&config)
}

#[tokio::test]
async fn test_query_and_key_are_sent() {
    let body = r#"{"status":"OK","results":[
        {"place_id":"p1","name":"Luigi's","vicinity":"12 Evergreen Terrace","rating":4.6,"user_ratings_total":88},
        {"place_id":"p2","name":"Krusty Burger","formatted_address":"1 Main St, Springfield"}
    ]}"#;
    let (url, server) = serve_once("200 OK", body).await;

    let places = client_for(&url).text_search("restaurant in Springfield", "test-key").await.unwrap();
    let request = server.await.unwrap();

    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /textsearch/json?"));
    assert!(request_line.contains("query=restaurant+in+Springfield"));
    assert!(request_line.contains("key=test-key"));

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Luigi's");
    assert_eq!(places[0].rating, Some(4.6));
    assert_eq!(places[1].vicinity, "1 Main St, Springfield");
}

#[tokio::test]
async fn test_non_success_status_is_a_refusal_with_hint() {
    let (url, server) = serve_once("403 Forbidden", r#"{"error":"denied"}"#).await;

    let err = client_for(&url).text_search("cafe in Springfield", "bad-key").await.unwrap_err();
    server.await.unwrap();

    assert!(!err.is_transport());
    match err {
        Error::Places { status, hint, .. } => {
            assert_eq!(status, Some(403));
            assert!(hint.unwrap().contains("PLACES_API_KEY"));
        }
        other => panic!("expected a places refusal, got {other:?}"),
    }
}

#[tokio::test]
async fn test_provider_refusal_yields_no_places() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#,
    )
    .await;

    let places = client_for(&url).text_search("gym in Springfield", "bad-key").await.unwrap();
    server.await.unwrap();

    assert!(places.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let (url, server) = serve_once("200 OK", "<html>not json</html>").await;

    let err = client_for(&url).text_search("store in Springfield", "k").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop so the port is very likely closed
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/textsearch/json", listener.local_addr().unwrap());
    drop(listener);

    let err = client_for(&url).text_search("cafe in Nowhere", "k").await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
