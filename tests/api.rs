//! End-to-end API behavior against an in-memory SQLite store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use starwars_api::{app, AppState, SqlStore};
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

type App = NormalizePath<Router>;

async fn test_app() -> App {
    test_app_with_limit(64 * 1024).await
}

async fn test_app_with_limit(body_limit: usize) -> App {
    let store = SqlStore::in_memory().await.unwrap();
    app(AppState::new(store), body_limit)
}

async fn send(app: &App, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, request).await
}

/// Sends `raw` verbatim as a JSON-typed body, valid or not.
async fn send_raw(app: &App, method: &str, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &App, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_user(app: &App, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/user",
        Some(json!({
            "email": email,
            "password": "usetheforce",
            "firstName": "Luke",
            "lastName": "Skywalker"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["user"]["id"].as_i64().unwrap()
}

async fn create(app: &App, path: &str, key: &str, body: Value) -> i64 {
    let (status, body) = send(app, "POST", path, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body[key]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_user_and_reject_duplicate_email() {
    let app = test_app().await;
    let payload = json!({
        "email": "leia@alderaan.gov",
        "password": "hope",
        "firstName": "Leia",
        "lastName": "Organa"
    });

    let (status, body) = send(&app, "POST", "/user", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["email"], "leia@alderaan.gov");
    assert_eq!(body["user"]["firstName"], "Leia");
    assert_eq!(body["user"]["isActive"], true);
    assert!(body["user"].get("password").is_none());

    let (status, body) = send(&app, "POST", "/user", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");

    let (status, body) = send(&app, "GET", "/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_user_with_missing_fields() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/user",
        Some(json!({"email": "han@falcon.net", "password": "kessel"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");

    let (status, body) = send(&app, "POST", "/user", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");
}

#[tokio::test]
async fn test_nonexistent_ids_return_not_found() {
    let app = test_app().await;

    for (method, uri, body) in [
        ("GET", "/users/42", None),
        ("DELETE", "/user/42", None),
        ("GET", "/character/42", None),
        ("GET", "/planet/42", None),
        ("GET", "/starship/42", None),
        ("PUT", "/character/42", Some(json!({"name": "Nobody"}))),
        ("PUT", "/planet/42", Some(json!({"name": "Nowhere"}))),
        ("PUT", "/starship/42", Some(json!({"name": "Nothing"}))),
        ("GET", "/user/favorites/42", None),
        ("GET", "/planet/not-a-number", None),
        ("POST", "/favorite/droid/1", None),
    ] {
        let (status, body) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert!(body["message"].is_string(), "{} {}", method, uri);
    }

    let (_, body) = send(&app, "GET", "/starship/42", None).await;
    assert_eq!(body["message"], "Starship not found");

    // The id is resolved before the body, so a bad body on a missing row is still 404.
    for (uri, message) in [
        ("/character/42", "Character not found"),
        ("/planet/42", "Planet not found"),
        ("/starship/42", "Starship not found"),
    ] {
        let (status, body) = send(&app, "PUT", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {} without body", uri);
        assert_eq!(body["message"], message);

        let (status, body) = send_raw(&app, "PUT", uri, "{bad").await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {} with malformed body", uri);
        assert_eq!(body["message"], message);
    }
}

#[tokio::test]
async fn test_update_existing_row_with_malformed_body_is_bad_request() {
    let app = test_app().await;
    let id = create(&app, "/planet", "planet", json!({"name": "Dagobah"})).await;

    let (status, body) = send_raw(&app, "PUT", &format!("/planet/{}", id), "{bad").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (_, body) = send(&app, "GET", &format!("/planet/{}", id), None).await;
    assert_eq!(body["data"]["name"], "Dagobah");
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = test_app_with_limit(1024).await;
    let payload = json!({
        "email": "jabba@tatooine.org",
        "password": "x".repeat(4096),
        "firstName": "Jabba",
        "lastName": "Desilijic Tiure"
    });

    let (status, body) = send(&app, "POST", "/user", Some(payload)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["message"], "Request body too large");

    let (status, body) = send_raw(&app, "POST", "/user", "{bad").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");

    let (_, body) = send(&app, "GET", "/user", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_partial_update_keeps_omitted_fields() {
    let app = test_app().await;
    let id = create(
        &app,
        "/character",
        "character",
        json!({"name": "Anakin", "gender": "male", "height": "188"}),
    )
    .await;

    let (status, body) = send(&app, "PUT", &format!("/character/{}", id), Some(json!({"name": "Darth Vader"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Character {} updated successfully", id));
    assert_eq!(body["character"]["name"], "Darth Vader");
    assert_eq!(body["character"]["height"], "188");

    let (_, body) = send(&app, "GET", &format!("/character/{}", id), None).await;
    assert_eq!(
        body["data"],
        json!({"id": id, "name": "Darth Vader", "gender": "male", "height": "188"})
    );

    let planet = create(&app, "/planet", "planet", json!({"name": "Hoth", "weather": "frozen"})).await;
    let (status, body) = send(&app, "PUT", &format!("/planet/{}", planet), Some(json!({"weather": "blizzard"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["planet"], json!({"id": planet, "name": "Hoth", "weather": "blizzard"}));

    let ship = create(&app, "/starship", "starship", json!({"name": "Millennium Falcon"})).await;
    let (status, body) = send(&app, "PUT", &format!("/starship/{}", ship), Some(json!({"color": "grey"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["starship"], json!({"id": ship, "name": "Millennium Falcon", "color": "grey"}));
}

#[tokio::test]
async fn test_create_catalog_entity_requires_name() {
    let app = test_app().await;
    let (status, body) = send(&app, "POST", "/planet", Some(json!({"weather": "arid"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");

    let (_, body) = send(&app, "GET", "/planet", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_add_and_remove_favorites() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/favorite/planet/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Planet not found");

    let planet = create(&app, "/planet", "planet", json!({"name": "Tatooine"})).await;
    let (status, body) = send(&app, "POST", &format!("/favorite/planet/{}", planet), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], format!("Planet {} added to favorites", planet));

    let (status, body) = send(&app, "GET", "/favoriteplanet", None).await;
    assert_eq!(status, StatusCode::OK);
    let favorites = body["data"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["planetId"], planet);

    let (status, body) = send(&app, "DELETE", &format!("/favorite/planet/{}", planet), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Planet {} removed from favorites", planet));

    let (_, body) = send(&app, "GET", "/favoriteplanet", None).await;
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&app, "DELETE", &format!("/favorite/planet/{}", planet), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Favorite planet not found");
}

#[tokio::test]
async fn test_duplicate_favorites_are_removed_one_at_a_time() {
    let app = test_app().await;
    let ship = create(&app, "/starship", "starship", json!({"name": "X-wing"})).await;
    let uri = format!("/favorite/starship/{}", ship);

    send(&app, "POST", &uri, None).await;
    send(&app, "POST", &uri, None).await;
    let (_, body) = send(&app, "GET", "/favoritestarship", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/favoritestarship", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_favorites_lists_linked_characters() {
    let app = test_app().await;
    let user = create_user(&app, "luke@tatooine.org").await;
    let yoda = create(&app, "/character", "character", json!({"name": "Yoda"})).await;

    let (status, _) = send(&app, "POST", &format!("/favorite/character/{}?user_id=999", yoda), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", &format!("/favorite/character/{}?user_id={}", yoda, user), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", &format!("/favorite/character/{}", yoda), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", &format!("/user/favorites/{}", user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "ok");
    assert_eq!(
        body["favoritos"],
        json!([{"id": 1, "userId": user, "characterId": yoda}])
    );

    let (_, body) = send(&app, "GET", "/favoritecharacter", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_user_then_get_returns_not_found() {
    let app = test_app().await;
    let id = create_user(&app, "obiwan@jedi.org").await;

    let (status, body) = send(&app, "GET", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "obiwan@jedi.org");

    let (status, body) = send(&app, "DELETE", &format!("/user/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("User {} deleted successfully", id));

    let (status, body) = send(&app, "GET", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_trailing_slash_is_insignificant() {
    let app = test_app().await;
    create(&app, "/starship/", "starship", json!({"name": "TIE Fighter"})).await;

    let (status, body) = send(&app, "GET", "/starship/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "TIE Fighter");
}

#[tokio::test]
async fn test_service_endpoints() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "starwars-api");
    assert!(body["version"].is_string());

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["method"] == "GET" && e["path"] == "/users/{id}"));

    let (status, body) = send(&app, "GET", "/no/such/route", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Resource not found");
}
