mod restaurants;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};
use crate::store::RestaurantStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RestaurantStore>,
}

/// Error response rendered as `{"error": message}`.
///
/// The status comes from `code`; `request_id` is only logged.
#[derive(Debug)]
pub struct ApiError {
    pub request_id: String,
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    ok: bool,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            code,
            message: message.into(),
        }
    }

    pub fn internal(request_id: impl Into<String>) -> Self {
        Self::new(request_id, "internal_error", "Internal server error")
    }

    fn status(&self) -> StatusCode {
        match self.code {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "payload_too_large" => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(request_id = %self.request_id, code = self.code, "request failed");
        } else {
            tracing::warn!(
                request_id = %self.request_id,
                code = self.code,
                message = %self.message,
                "request rejected"
            );
        }
        (status, Json(ErrorBody { error: &self.message })).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

/// Router for the restaurant API. `max_body_bytes` caps request bodies;
/// larger ones get 413.
pub fn build_app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/restaurants",
            get(restaurants::list_restaurants).post(restaurants::create_restaurant),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { ok: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app(max_body_bytes: usize) -> Router {
        build_app(
            AppState {
                store: Arc::new(RestaurantStore::new()),
            },
            max_body_bytes,
        )
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/restaurants")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    fn spice_hub(dishes: &str) -> Value {
        json!({
            "name": "Spice Hub",
            "mapLink": "https://maps.app.goo.gl/spice",
            "dishes": dishes,
            "restaurantImage": "data:image/jpeg;base64,AAAA",
            "dishImage": "data:image/jpeg;base64,BBBB"
        })
    }

    #[test]
    fn api_error_codes_map_to_statuses() {
        let cases = [
            ("validation_error", StatusCode::BAD_REQUEST),
            ("bad_request", StatusCode::BAD_REQUEST),
            ("payload_too_large", StatusCode::PAYLOAD_TOO_LARGE),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, expected) in cases {
            let response = ApiError::new("req-1", code, "msg").into_response();
            assert_eq!(response.status(), expected, "code {code}");
        }
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = test_app(1024).oneshot(get("/api/health")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"ok": true}));
    }

    #[tokio::test]
    async fn create_then_update_by_name() {
        let app = test_app(1024 * 1024);

        let created = app
            .clone()
            .oneshot(post_json(&spice_hub("Veg Biryani, Chicken Curry")))
            .await
            .expect("response");
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = json_body(created).await;
        assert_eq!(created["updated"], json!(false));
        let id = created["id"].as_str().expect("id").to_string();

        let updated = app
            .clone()
            .oneshot(post_json(&spice_hub("chicken curry, Paneer Tikka")))
            .await
            .expect("response");
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = json_body(updated).await;
        assert_eq!(updated, json!({"id": id, "updated": true}));

        let listed = app.oneshot(get("/api/restaurants")).await.expect("response");
        assert_eq!(listed.status(), StatusCode::OK);
        let listed = json_body(listed).await;
        let records = listed.as_array().expect("array");
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0]["dishes"],
            json!("Veg Biryani, chicken curry, Paneer Tikka")
        );
        assert_eq!(records[0]["mapLink"], json!("https://maps.app.goo.gl/spice"));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let app = test_app(1024 * 1024);
        for name in ["Pizza Corner", "Grill House"] {
            let mut body = spice_hub("Dal");
            body["name"] = json!(name);
            let response = app.clone().oneshot(post_json(&body)).await.expect("response");
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let listed = json_body(app.oneshot(get("/api/restaurants")).await.expect("response")).await;
        let names: Vec<&str> = listed
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|r| r["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Grill House", "Pizza Corner"]);
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let mut body = spice_hub("Dal");
        body.as_object_mut().expect("object").remove("dishImage");

        let response = test_app(1024 * 1024)
            .oneshot(post_json(&body))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": "All fields are required."})
        );
    }

    #[tokio::test]
    async fn blank_field_is_rejected() {
        let response = test_app(1024 * 1024)
            .oneshot(post_json(&spice_hub("   ")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/restaurants")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request");

        let response = test_app(1024).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let body = spice_hub(&"Dal, ".repeat(100));
        let response = test_app(64).oneshot(post_json(&body)).await.expect("response");
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await, json!({"error": "Payload too large"}));
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let response = test_app(1024).oneshot(get("/api/health")).await.expect("response");
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}
