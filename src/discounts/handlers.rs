// HTTP handlers for the discount endpoints

use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::auth::AdminUser;
use crate::discounts::models::{DiscountRecord, SaveAck};
use crate::discounts::sanitize::sanitize_record;
use crate::discounts::vocabulary::Vocabulary;
use crate::error::ApiError;
use crate::AppState;

/// Handler for GET /api/get-all-discounts
/// Merges the five typed collections and sorts them chronologically
///
/// Sort order is ascending by `createdAt` (oldest first); records without
/// a parseable timestamp sort as the epoch and therefore come first. The
/// sort is stable, so ties keep their concatenation order.
#[utoipa::path(
    get,
    path = "/api/get-all-discounts",
    responses(
        (status = 200, description = "Merged, chronologically sorted discount rules", body = Vec<DiscountRecord>)
    ),
    tag = "discounts"
)]
pub async fn get_all_discounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiscountRecord>>, ApiError> {
    tracing::debug!("Fetching all typed discount collections");

    let mut records = state.discounts.load_all_typed().await?;
    records.sort_by_key(DiscountRecord::created_epoch);

    tracing::debug!("Returning {} merged discount records", records.len());
    Ok(Json(records))
}

/// Handler for POST /api/save-data
/// Sanitizes one submitted discount rule and appends it to the catch-all
/// collection
#[utoipa::path(
    post,
    path = "/api/save-data",
    responses(
        (status = 200, description = "Rule sanitized and appended", body = SaveAck),
        (status = 400, description = "Empty or malformed submission"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 500, description = "Option store rejected the write")
    ),
    tag = "discounts"
)]
pub async fn save_discount(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<Value>,
) -> Result<Json<SaveAck>, ApiError> {
    // diagnostic only; the stored record is what sanitize_record returns
    tracing::debug!(user_id = admin.user_id, "Raw discount payload: {}", payload);

    let sanitized = sanitize_record(&payload)?;
    tracing::debug!("Sanitized discount payload: {}", sanitized);

    state.discounts.append(sanitized).await?;

    tracing::info!(user_id = admin.user_id, "Discount rule saved");
    Ok(Json(SaveAck {
        success: true,
        message: "Data saved successfully.".to_string(),
    }))
}

/// Handler for GET /api/get-discounts
/// Returns the catch-all collection verbatim, in append order
#[utoipa::path(
    get,
    path = "/api/get-discounts",
    responses(
        (status = 200, description = "Catch-all collection exactly as stored")
    ),
    tag = "discounts"
)]
pub async fn get_discounts(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let data = state.discounts.load_catch_all_raw().await?;
    Ok(Json(data))
}

/// Handler for GET /api/vocabulary
/// Condition fields, operator families, and product targets for the form UI
#[utoipa::path(
    get,
    path = "/api/vocabulary",
    responses(
        (status = 200, description = "Form vocabularies", body = Vocabulary)
    ),
    tag = "discounts"
)]
pub async fn get_vocabulary() -> Json<Vocabulary> {
    Json(Vocabulary::new())
}
