use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use service::users::domain::{User, UserCreateRequest, UserId, UserUpdateRequest};
use service::users::service::{DEFAULT_AGE_FROM, DEFAULT_AGE_TO};

use super::AppState;
use crate::errors::ApiError;

pub const PHONE_MAX_LEN: usize = 16;
pub const PHONE_TOO_LONG: &str = "Phone must be at most 16 characters!";

#[derive(Debug, Deserialize)]
pub struct AgeRangeQuery {
    #[serde(default = "default_from")]
    pub from: i32,
    #[serde(default = "default_to")]
    pub to: i32,
}

fn default_from() -> i32 {
    DEFAULT_AGE_FROM
}

fn default_to() -> i32 {
    DEFAULT_AGE_TO
}

/// An empty body or a JSON `null` is an absent request, not a decode error.
fn parse_optional_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(body)
        .map_err(|e| ApiError::BadRequest(format!("Malformed request body: {e}")))
}

fn check_phone(phone: Option<&str>) -> Result<(), ApiError> {
    match phone {
        Some(p) if p.chars().count() > PHONE_MAX_LEN => Err(ApiError::BadRequest(PHONE_TOO_LONG.to_string())),
        _ => Ok(()),
    }
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<&'static str, ApiError> {
    let request: Option<UserCreateRequest> = parse_optional_body(&body)?;
    if let Some(r) = &request {
        check_phone(r.phone())?;
    }
    Ok(state.users.create_user(request).await?)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let request: Option<UserUpdateRequest> = parse_optional_body(&body)?;
    if let Some(r) = &request {
        check_phone(r.phone())?;
    }
    Ok(state.users.update_user(id, request).await?)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<&'static str, ApiError> {
    Ok(state.users.delete_user(id).await?)
}

pub async fn list_by_age(
    State(state): State<AppState>,
    Query(range): Query<AgeRangeQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.users_by_age_range(range.from, range.to).await?;
    Ok(Json(users))
}
