//! Character, planet and starship handlers: list, get, create, partial update.

use crate::error::AppError;
use crate::extractors::ValidPath;
use crate::models::{CharacterFields, PlanetFields, StarshipFields};
use crate::response::{message_with, success_data};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list_characters(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(success_data(state.store.list_characters().await?))
}

pub async fn get_character(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let character = state
        .store
        .get_character(id)
        .await?
        .ok_or_else(|| AppError::not_found("Character"))?;
    Ok(success_data(character))
}

pub async fn create_character(
    State(state): State<AppState>,
    payload: Result<Json<CharacterFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let fields = super::required_body(payload)?;
    let name = fields.name.clone().ok_or_else(super::missing_fields)?;
    let character = state.store.insert_character(&name, &fields).await?;
    tracing::info!(id = character.id, "character created");
    Ok(message_with(
        StatusCode::CREATED,
        "Character created successfully".into(),
        "character",
        &character,
    )?)
}

/// PUT /character/:id. The id is resolved before the body is read; fields
/// absent from the body keep their stored value.
pub async fn update_character(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    payload: Result<Json<CharacterFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut character = state
        .store
        .get_character(id)
        .await?
        .ok_or_else(|| AppError::not_found("Character"))?;
    let Json(changes) = payload?;
    character.apply(changes);
    state.store.update_character(&character).await?;
    Ok(message_with(
        StatusCode::OK,
        format!("Character {} updated successfully", id),
        "character",
        &character,
    )?)
}

pub async fn list_planets(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(success_data(state.store.list_planets().await?))
}

pub async fn get_planet(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let planet = state
        .store
        .get_planet(id)
        .await?
        .ok_or_else(|| AppError::not_found("Planet"))?;
    Ok(success_data(planet))
}

pub async fn create_planet(
    State(state): State<AppState>,
    payload: Result<Json<PlanetFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let fields = super::required_body(payload)?;
    let name = fields.name.clone().ok_or_else(super::missing_fields)?;
    let planet = state.store.insert_planet(&name, &fields).await?;
    tracing::info!(id = planet.id, "planet created");
    Ok(message_with(
        StatusCode::CREATED,
        "Planet created successfully".into(),
        "planet",
        &planet,
    )?)
}

pub async fn update_planet(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    payload: Result<Json<PlanetFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut planet = state
        .store
        .get_planet(id)
        .await?
        .ok_or_else(|| AppError::not_found("Planet"))?;
    let Json(changes) = payload?;
    planet.apply(changes);
    state.store.update_planet(&planet).await?;
    Ok(message_with(
        StatusCode::OK,
        format!("Planet {} updated successfully", id),
        "planet",
        &planet,
    )?)
}

pub async fn list_starships(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(success_data(state.store.list_starships().await?))
}

pub async fn get_starship(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let starship = state
        .store
        .get_starship(id)
        .await?
        .ok_or_else(|| AppError::not_found("Starship"))?;
    Ok(success_data(starship))
}

pub async fn create_starship(
    State(state): State<AppState>,
    payload: Result<Json<StarshipFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let fields = super::required_body(payload)?;
    let name = fields.name.clone().ok_or_else(super::missing_fields)?;
    let starship = state.store.insert_starship(&name, &fields).await?;
    tracing::info!(id = starship.id, "starship created");
    Ok(message_with(
        StatusCode::CREATED,
        "Starship created successfully".into(),
        "starship",
        &starship,
    )?)
}

pub async fn update_starship(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    payload: Result<Json<StarshipFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut starship = state
        .store
        .get_starship(id)
        .await?
        .ok_or_else(|| AppError::not_found("Starship"))?;
    let Json(changes) = payload?;
    starship.apply(changes);
    state.store.update_starship(&starship).await?;
    Ok(message_with(
        StatusCode::OK,
        format!("Starship {} updated successfully", id),
        "starship",
        &starship,
    )?)
}
