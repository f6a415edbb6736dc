//! `GET /api/restaurants` and `POST /api/restaurants`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use cravory_core::{NewRestaurant, RestaurantRecord, SubmitOutcome};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// GET /api/restaurants: every record, newest first.
pub(super) async fn list_restaurants(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<RestaurantRecord>>, ApiError> {
    let records = state.store.list().map_err(|e| {
        tracing::error!(error = %e, "listing restaurants failed");
        ApiError::internal(&req_id.0)
    })?;
    Ok(Json(records))
}

/// POST /api/restaurants: create, or update the record with the same name.
pub(super) async fn create_restaurant(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<NewRestaurant>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitOutcome>), ApiError> {
    let rid = &req_id.0;

    let Json(body) = body.map_err(|rejection| map_rejection(rid, &rejection))?;

    tracing::info!(
        request_id = %rid,
        name = %body.name,
        has_map_link = !body.map_link.is_empty(),
        dishes_len = body.dishes.len(),
        restaurant_image_len = body.restaurant_image.len(),
        dish_image_len = body.dish_image.len(),
        "create/update restaurant"
    );

    body.validate()
        .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))?;

    let outcome = state.store.upsert(body).map_err(|e| {
        tracing::error!(error = %e, "storing restaurant failed");
        ApiError::internal(rid)
    })?;

    let status = if outcome.updated {
        tracing::info!(request_id = %rid, id = %outcome.id, "updated restaurant");
        StatusCode::OK
    } else {
        tracing::info!(request_id = %rid, id = %outcome.id, "created restaurant");
        StatusCode::CREATED
    };
    Ok((status, Json(outcome)))
}

fn map_rejection(request_id: &str, rejection: &JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(request_id, "payload_too_large", "Payload too large")
    } else {
        ApiError::new(request_id, "bad_request", rejection.body_text())
    }
}
