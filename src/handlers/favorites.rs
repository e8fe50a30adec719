//! Favorite relation handlers.

use crate::error::AppError;
use crate::extractors::ValidPath;
use crate::models::{Favorite, FavoriteKind};
use crate::response::{success_data, success_message};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct FavoriteParams {
    /// Links the new favorite to a user. Unset leaves the row unowned.
    pub user_id: Option<i64>,
}

#[derive(Serialize)]
pub struct UserFavorites {
    pub msg: &'static str,
    pub favoritos: Vec<Favorite>,
}

async fn list_kind(state: &AppState, kind: FavoriteKind) -> Result<impl IntoResponse, AppError> {
    Ok(success_data(state.store.list_favorites(kind).await?))
}

/// GET /favoritecharacter
pub async fn list_favorite_characters(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    list_kind(&state, FavoriteKind::Character).await
}

/// GET /favoriteplanet
pub async fn list_favorite_planets(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    list_kind(&state, FavoriteKind::Planet).await
}

/// GET /favoritestarship
pub async fn list_favorite_starships(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    list_kind(&state, FavoriteKind::Starship).await
}

/// POST /favorite/:kind/:id. Re-adding an existing favorite inserts another row.
pub async fn add_favorite(
    State(state): State<AppState>,
    ValidPath((kind, target_id)): ValidPath<(FavoriteKind, i64)>,
    params: Result<Query<FavoriteParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if !state.store.target_exists(kind, target_id).await? {
        return Err(AppError::not_found(kind.label()));
    }
    if let Some(user_id) = params.user_id {
        if state.store.get_user(user_id).await?.is_none() {
            return Err(AppError::not_found("User"));
        }
    }

    let favorite = state.store.insert_favorite(kind, target_id, params.user_id).await?;
    tracing::info!(kind = kind.noun(), id = favorite.id, target_id, "favorite added");
    Ok(success_message(
        StatusCode::CREATED,
        format!("{} {} added to favorites", kind.label(), target_id),
    ))
}

/// DELETE /favorite/:kind/:id. Removes the oldest favorite row for the target.
pub async fn remove_favorite(
    State(state): State<AppState>,
    ValidPath((kind, target_id)): ValidPath<(FavoriteKind, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let favorite = state
        .store
        .first_favorite(kind, target_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Favorite {} not found", kind.noun())))?;
    state.store.delete_favorite(kind, favorite.id).await?;
    tracing::info!(kind = kind.noun(), id = favorite.id, target_id, "favorite removed");
    Ok(success_message(
        StatusCode::OK,
        format!("{} {} removed from favorites", kind.label(), target_id),
    ))
}

/// GET /user/favorites/:user_id. Only favorite characters are listed.
pub async fn list_user_favorites(
    State(state): State<AppState>,
    ValidPath(user_id): ValidPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if state.store.get_user(user_id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }
    let favoritos = state
        .store
        .list_user_favorites(FavoriteKind::Character, user_id)
        .await?;
    Ok((StatusCode::OK, Json(UserFavorites { msg: "ok", favoritos })))
}
