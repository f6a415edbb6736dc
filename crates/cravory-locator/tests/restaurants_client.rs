//! Integration tests for `RestaurantsClient` using wiremock HTTP mocks.

use std::time::Duration;

use cravory_core::{AppConfig, Environment, NewRestaurant, ValidationError};
use cravory_locator::{ClientError, RestaurantsClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> RestaurantsClient {
    RestaurantsClient::new(base_url, "cravory-test/0.1", 5, 1)
        .expect("client construction should not fail")
}

fn submission() -> NewRestaurant {
    NewRestaurant {
        name: "Spice Hub".to_string(),
        map_link: "https://maps.app.goo.gl/spice".to_string(),
        dishes: "Veg Biryani, Chicken Curry".to_string(),
        restaurant_image: "data:image/jpeg;base64,AAAA".to_string(),
        dish_image: "data:image/jpeg;base64,BBBB".to_string(),
    }
}

#[tokio::test]
async fn list_parses_records_in_server_order() {
    let server = MockServer::start().await;
    let body = json!([
        {
            "_id": "2",
            "name": "Pizza Corner",
            "mapLink": "https://maps.app.goo.gl/pizza",
            "dishes": "Cheese Pizza",
            "restaurantImage": "data:,",
            "dishImage": "data:,",
            "createdAt": "2025-09-02T10:00:00Z"
        },
        {
            "id": "1",
            "name": "Spice Hub",
            "mapLink": "https://www.google.com/maps/@12.9716,77.5946,15z",
            "dishes": "Veg Biryani, Chicken Curry",
            "restaurantImage": "data:,",
            "dishImage": "data:,"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = test_client(&server.uri()).list().await.expect("list");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "2");
    assert_eq!(records[0].name, "Pizza Corner");
    assert_eq!(records[1].dish_list().len(), 2);
}

#[tokio::test]
async fn list_surfaces_server_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/restaurants"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Internal server error"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).list().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Api { status: 500, ref message } if message == "Internal server error"),
        "expected Api(500), got: {err:?}"
    );
}

#[tokio::test]
async fn submit_returns_created_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/restaurants"))
        .and(body_partial_json(json!({
            "name": "Spice Hub",
            "mapLink": "https://maps.app.goo.gl/spice"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "abc", "updated": false})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_client(&server.uri())
        .submit(&submission())
        .await
        .expect("submit");
    assert_eq!(outcome.id, "abc");
    assert!(!outcome.updated);
}

#[tokio::test]
async fn submit_returns_updated_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc", "updated": true})))
        .mount(&server)
        .await;

    let outcome = test_client(&server.uri())
        .submit(&submission())
        .await
        .expect("submit");
    assert!(outcome.updated);
}

#[tokio::test]
async fn submit_validates_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut incomplete = submission();
    incomplete.dishes = "  ".to_string();

    let err = test_client(&server.uri())
        .submit(&incomplete)
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            ClientError::Validation(ValidationError::MissingFields { ref fields }) if fields == &vec!["dishes"]
        ),
        "expected Validation, got: {err:?}"
    );
}

#[tokio::test]
async fn submit_surfaces_bad_request_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/restaurants"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "All fields are required."})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .submit(&submission())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "server returned 400: All fields are required.");
}

#[tokio::test]
async fn submit_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/restaurants"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "late", "updated": false}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .submit(&submission())
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::Timeout { timeout_secs: 1, .. }),
        "expected Timeout, got: {err:?}"
    );
}

#[tokio::test]
async fn list_uses_api_timeout_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/restaurants"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("socket addr"),
        log_level: "info".to_string(),
        api_base_url: server.uri(),
        user_agent: "cravory-test/0.1".to_string(),
        api_timeout_secs: 1,
        resolve_timeout_secs: 30,
        submit_timeout_secs: 30,
        resolve_batch_limit: 5,
        max_body_bytes: 1024,
    };

    let err = RestaurantsClient::from_config(&config)
        .expect("client construction should not fail")
        .list()
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::Http(ref e) if e.is_timeout()),
        "expected a timeout, got: {err:?}"
    );
}
