//! `/users` collection and `/users/{id}` resource handlers.
//!
//! Each handler decodes its inputs, makes one gateway call and maps the
//! outcome onto a status code.  No state is kept between requests.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{NewUser, UserPatch, UserRow};
use serde::de::DeserializeOwned;

use super::AppState;
use crate::ApiError;

/// Parse the `{id}` path segment.  Only a complete base-10 `i32` is accepted.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::InvalidId)
}

/// Decode a JSON body into a typed payload before any storage call.
/// `reject` picks the error a decode failure becomes for this route.
pub fn decode_body<T: DeserializeOwned>(
    body: &[u8],
    reject: fn(serde_json::Error) -> ApiError,
) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(reject)
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserRow>>, ApiError> {
    let users = state.gateway.list_all().await?;
    Ok(Json(users))
}

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserRow>), ApiError> {
    let new_user: NewUser = decode_body(&body, ApiError::UndecodableInsert)?;
    let user = state.gateway.insert(&new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserRow>, ApiError> {
    let id = parse_id(&id)?;
    match state.gateway.get_by_id(id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UserRow>, ApiError> {
    let id = parse_id(&id)?;
    let patch: UserPatch = decode_body(&body, ApiError::InvalidBody)?;
    match state.gateway.update_by_id(id, &patch).await? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserRow>, ApiError> {
    let id = parse_id(&id)?;
    match state.gateway.delete_by_id(id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound),
    }
}
