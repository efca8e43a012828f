use crate::models::info::{info_to_json, new_info};
use crate::services::record_submission;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use mongodb::bson::doc;
use serde_json::Value;
use service_core::error::AppError;
use service_core::response::ApiResponse;

#[tracing::instrument(skip(state, body))]
pub async fn create_info(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(value) =
        body.map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid JSON body: {}", e)))?;

    let Value::Object(fields) = value else {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Info must be a JSON object"
        )));
    };

    let document = new_info(fields)?;

    state
        .db
        .infos()
        .insert_one(&document, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert info record: {}", e);
            AppError::from(e)
        })?;

    record_submission("infos");

    Ok(ApiResponse::created(
        "Info created successfully",
        info_to_json(document),
    ))
}

pub async fn list_infos(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let infos = state
        .db
        .find_all(&state.db.infos(), doc! { "created_at": 1 })
        .await?;

    let infos: Vec<Value> = infos.into_iter().map(info_to_json).collect();

    Ok(ApiResponse::ok("Info fetched successfully", infos))
}
