use super::required;
use crate::dtos::{LoginRequest, LogoutRequest, SignupRequest, UserResponse};
use crate::models::User;
use crate::services::record_submission;
use crate::startup::AppState;
use crate::utils::{hash_password, Password, ValidatedJson};
use axum::{extract::State, response::IntoResponse};
use mongodb::{
    bson::{doc, Bson, DateTime as BsonDateTime},
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use service_core::error::AppError;
use service_core::response::ApiResponse;

/// Flips the login flag of the user with `email`, returning the updated user.
async fn set_logged_in(
    state: &AppState,
    email: &str,
    logged_in: bool,
) -> Result<Option<User>, AppError> {
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    state
        .db
        .users()
        .find_one_and_update(
            doc! { "email": email },
            doc! { "$set": { "is_logged_in": logged_in, "updated_at": BsonDateTime::now() } },
            options,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to update login state: {}", e);
            AppError::from(e)
        })
}

/// Login through the identity provider: marks a known user as logged in, or
/// creates the user on first visit, as a single upsert on the email.
#[tracing::instrument(skip(state, request))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = required(request.email, "Email is required")?;
    let candidate = User::logged_in(email.clone(), request.user_name, request.user_photo);

    let options = FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::Before)
        .build();

    let previous = state
        .db
        .users()
        .find_one_and_update(
            doc! { "email": &email },
            doc! {
                "$set": {
                    "is_logged_in": true,
                    "updated_at": BsonDateTime::from_chrono(candidate.updated_at),
                },
                "$setOnInsert": {
                    "_id": &candidate.id,
                    "user_name": candidate.user_name.clone(),
                    "user_photo": candidate.user_photo.clone(),
                    "password_hash": Bson::Null,
                    "created_at": BsonDateTime::from_chrono(candidate.created_at),
                },
            },
            options,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert user on login: {}", e);
            AppError::from(e)
        })?;

    match previous {
        // Only the two `$set` fields changed on an existing user.
        Some(mut user) => {
            user.is_logged_in = true;
            user.updated_at = candidate.updated_at;
            tracing::info!(user_id = %user.id, "User logged in");
            Ok(ApiResponse::ok(
                "User logged in successfully",
                UserResponse::from(user),
            ))
        }
        None => {
            record_submission("users");
            tracing::info!(user_id = %candidate.id, "New user created on login");
            Ok(ApiResponse::ok(
                "New user created and logged in successfully",
                UserResponse::from(candidate),
            ))
        }
    }
}

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state
        .db
        .find_all(&state.db.users(), doc! { "created_at": 1 })
        .await?;

    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(ApiResponse::ok("Users fetched successfully", users))
}

#[tracing::instrument(skip(state, request))]
pub async fn logout_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LogoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = required(request.email, "Email is required")?;

    let user = set_logged_in(&state, &email, false)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))?;

    tracing::info!(user_id = %user.id, "User logged out");

    Ok(ApiResponse::ok(
        "User logged out successfully",
        UserResponse::from(user),
    ))
}

#[tracing::instrument(skip(state, request))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = required(request.name, "All fields are required")?;
    let email = required(request.email, "All fields are required")?;
    let password = Password::new(required(request.password, "All fields are required")?);

    let existing = state
        .db
        .users()
        .find_one(doc! { "email": &email }, None)
        .await
        .map_err(AppError::from)?;

    if existing.is_some() {
        return Err(AppError::BadRequest(anyhow::anyhow!("User already exists")));
    }

    // Hashing is CPU-bound, run it on the blocking pool.
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Hashing task failed: {}", e)))??;

    let user = User::registered(email, name, password_hash);
    state
        .db
        .users()
        .insert_one(&user, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert user {}: {}", user.id, e);
            AppError::from(e)
        })?;

    record_submission("users");
    tracing::info!(user_id = %user.id, "User registered");

    Ok(ApiResponse::created(
        "User registered successfully",
        UserResponse::from(user),
    ))
}
