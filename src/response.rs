//! Response envelope helpers: `{data}` for reads, `{message}` for confirmations.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

pub fn success_data<T: Serialize>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::OK, Json(Data { data }))
}

pub fn success_message(status: StatusCode, message: String) -> (StatusCode, Json<Message>) {
    (status, Json(Message { message }))
}

/// `{message, <key>: entity}` used by create and update handlers.
pub fn message_with<T: Serialize>(
    status: StatusCode,
    message: String,
    key: &str,
    entity: &T,
) -> Result<(StatusCode, Json<serde_json::Value>), serde_json::Error> {
    let mut body = serde_json::Map::new();
    body.insert("message".into(), serde_json::Value::String(message));
    body.insert(key.to_string(), serde_json::to_value(entity)?);
    Ok((status, Json(serde_json::Value::Object(body))))
}
