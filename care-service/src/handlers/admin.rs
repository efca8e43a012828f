use super::required;
use crate::dtos::{AdminResponse, CreateAdminRequest};
use crate::models::Admin;
use crate::services::record_submission;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, response::IntoResponse};
use mongodb::{bson::doc, options::FindOneOptions};
use service_core::error::AppError;
use service_core::response::ApiResponse;

#[tracing::instrument(skip(state, request))]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = Admin::new(
        required(request.email, "Email and password are required")?,
        required(request.password, "Email and password are required")?,
    );

    state
        .db
        .admins()
        .insert_one(&admin, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert admin {}: {}", admin.id, e);
            AppError::from(e)
        })?;

    record_submission("admins");
    tracing::info!(admin_id = %admin.id, "Admin created");

    Ok(ApiResponse::ok(
        "Admin created successfully",
        AdminResponse::from(admin),
    ))
}

/// Returns the first admin ever created.
pub async fn get_admin(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let options = FindOneOptions::builder()
        .sort(doc! { "created_at": 1 })
        .build();

    let admin = state
        .db
        .admins()
        .find_one(None, options)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch admin details: {}", e);
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Admin details not found")))?;

    Ok(ApiResponse::ok(
        "Admin details fetched successfully",
        AdminResponse::from(admin),
    ))
}
