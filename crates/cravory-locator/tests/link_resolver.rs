//! Integration tests for `LinkResolver` against wiremock servers.
//!
//! Each test stands up a local HTTP server so no real map service is hit.

use cravory_core::Coordinate;
use cravory_locator::LinkResolver;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_resolver() -> LinkResolver {
    LinkResolver::new(5, "cravory-test/0.1").expect("failed to build test LinkResolver")
}

#[tokio::test]
async fn follows_redirect_and_reads_coordinate_from_final_url() {
    let server = MockServer::start().await;
    let target = format!(
        "{}/maps/place/Spice+Hub/@12.9716,77.5946,15z",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", target.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/maps/place/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let coord = test_resolver()
        .resolve(&format!("{}/short", server.uri()))
        .await;

    assert_eq!(coord, Some(Coordinate::new(12.9716, 77.5946)));
}

#[tokio::test]
async fn falls_back_to_page_body() {
    let server = MockServer::start().await;
    let html = r#"<html><script>var state = {"center":{"lat":13.0827,"lng":80.2707}};</script></html>"#;

    Mock::given(method("GET"))
        .and(path("/place"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let coord = test_resolver()
        .resolve(&format!("{}/place", server.uri()))
        .await;

    assert_eq!(coord, Some(Coordinate::new(13.0827, 80.2707)));
}

#[tokio::test]
async fn scans_body_of_non_success_response() {
    let server = MockServer::start().await;
    let html = r#"<a href="https://www.google.com/maps/place/data=!3d19.076!4d72.8777">open</a>"#;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string(html))
        .mount(&server)
        .await;

    let coord = test_resolver()
        .resolve(&format!("{}/gone", server.uri()))
        .await;

    assert_eq!(coord, Some(Coordinate::new(19.076, 72.8777)));
}

#[tokio::test]
async fn returns_none_when_nothing_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><p>closed</p></html>"))
        .mount(&server)
        .await;

    let coord = test_resolver()
        .resolve(&format!("{}/plain", server.uri()))
        .await;

    assert_eq!(coord, None);
}

#[tokio::test]
async fn returns_none_on_connection_failure() {
    // Nothing listens on port 1; the connection is refused.
    let coord = test_resolver().resolve("http://127.0.0.1:1/short").await;
    assert_eq!(coord, None);
}

#[tokio::test]
async fn returns_none_for_malformed_link() {
    let coord = test_resolver().resolve("not a link").await;
    assert_eq!(coord, None);
}
