use super::required;
use crate::dtos::{CreateReviewRequest, ReviewResponse};
use crate::models::Review;
use crate::services::record_submission;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use mongodb::bson::doc;
use service_core::error::AppError;
use service_core::response::ApiResponse;

#[tracing::instrument(skip(state, request))]
pub async fn create_review(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let review = Review::new(
        required(request.name, "Login is required")?,
        required(request.message, "Review is required")?,
        request.user_photo,
    );

    state
        .db
        .reviews()
        .insert_one(&review, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert review {}: {}", review.id, e);
            AppError::from(e)
        })?;

    record_submission("reviews");
    tracing::info!(review_id = %review.id, "Review added");

    Ok(ApiResponse::ok(
        "Review added successfully",
        ReviewResponse::from(review),
    ))
}

pub async fn list_reviews(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let reviews = state
        .db
        .find_all(&state.db.reviews(), doc! { "created_at": -1 })
        .await?;

    let reviews: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();

    Ok(ApiResponse::ok("Review fetched successfully", reviews))
}

#[tracing::instrument(skip(state))]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .reviews()
        .delete_one(doc! { "_id": &review_id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Review not found")));
    }

    tracing::info!(review_id = %review_id, "Review deleted");

    Ok(ApiResponse::message("Review deleted successfully"))
}
