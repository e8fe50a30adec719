//! User handlers: list, get, create, delete.

use crate::error::AppError;
use crate::extractors::ValidPath;
use crate::models::CreateUser;
use crate::response::{message_with, success_data, success_message};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// GET /user
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.store.list_users().await?;
    Ok(success_data(users))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.store.get_user(id).await?.ok_or_else(|| AppError::not_found("User"))?;
    Ok(success_data(user))
}

/// POST /user. An absent or malformed body counts as missing fields.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = super::required_body(payload)?
        .into_new_user()
        .ok_or_else(super::missing_fields)?;

    if state.store.find_user_by_email(&new_user.email).await?.is_some() {
        return Err(AppError::BadRequest("Email already exists".into()));
    }

    let user = state.store.insert_user(&new_user).await?;
    tracing::info!(id = user.id, "user created");
    Ok(message_with(
        StatusCode::CREATED,
        "User created successfully".into(),
        "user",
        &user,
    )?)
}

/// DELETE /user/:id
pub async fn delete_user(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_user(id).await? {
        return Err(AppError::not_found("User"));
    }
    tracing::info!(id, "user deleted");
    Ok(success_message(
        StatusCode::OK,
        format!("User {} deleted successfully", id),
    ))
}
