//! Resource and favorite routes.

use crate::handlers::{
    add_favorite, create_character, create_planet, create_starship, create_user, delete_user, get_character,
    get_planet, get_starship, get_user, list_characters, list_favorite_characters, list_favorite_planets,
    list_favorite_starships, list_planets, list_starships, list_user_favorites, list_users, remove_favorite,
    update_character, update_planet, update_starship,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

/// Every API route as (method, path), served by the sitemap at `/`.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/user"),
    ("POST", "/user"),
    ("GET", "/users/{id}"),
    ("DELETE", "/user/{id}"),
    ("GET", "/user/favorites/{user_id}"),
    ("GET", "/character"),
    ("POST", "/character"),
    ("GET", "/character/{id}"),
    ("PUT", "/character/{id}"),
    ("GET", "/planet"),
    ("POST", "/planet"),
    ("GET", "/planet/{id}"),
    ("PUT", "/planet/{id}"),
    ("GET", "/starship"),
    ("POST", "/starship"),
    ("GET", "/starship/{id}"),
    ("PUT", "/starship/{id}"),
    ("GET", "/favoritecharacter"),
    ("GET", "/favoriteplanet"),
    ("GET", "/favoritestarship"),
    ("POST", "/favorite/{character|planet|starship}/{id}"),
    ("DELETE", "/favorite/{character|planet|starship}/{id}"),
];

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
        .route("/user/:id", axum::routing::delete(delete_user))
        .route("/user/favorites/:user_id", get(list_user_favorites))
        .route("/character", get(list_characters).post(create_character))
        .route("/character/:id", get(get_character).put(update_character))
        .route("/planet", get(list_planets).post(create_planet))
        .route("/planet/:id", get(get_planet).put(update_planet))
        .route("/starship", get(list_starships).post(create_starship))
        .route("/starship/:id", get(get_starship).put(update_starship))
        .route("/favoritecharacter", get(list_favorite_characters))
        .route("/favoriteplanet", get(list_favorite_planets))
        .route("/favoritestarship", get(list_favorite_starships))
        .route("/favorite/:kind/:id", post(add_favorite).delete(remove_favorite))
        .with_state(state)
}
