//! User handlers.

use crate::error::AppError;
use crate::model::{User, UserInput};
use crate::response::{self, MessageBody};
use crate::service::{RequestValidator, UserService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/user/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found"),
    ),
    tag = "user",
)]
pub async fn get_user(State(state): State<AppState>, Path(username): Path<String>) -> Result<impl IntoResponse, AppError> {
    let user = UserService::find_by_username(&state.gateway, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;
    Ok(response::ok(user))
}

#[utoipa::path(
    post,
    path = "/user",
    request_body = UserInput,
    responses(
        (status = 200, description = "Stored user", body = User),
        (status = 409, description = "Username already taken"),
    ),
    tag = "user",
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    RequestValidator::validate_user(&input)?;
    let user = UserService::create(&state.gateway, &input).await?;
    Ok(response::ok(user))
}

#[utoipa::path(
    post,
    path = "/user/createWithList",
    request_body = [UserInput],
    responses(
        (status = 200, description = "Stored users in id order", body = [User]),
        (status = 409, description = "A username is already taken"),
        (status = 422, description = "Empty list or repeated username"),
    ),
    tag = "user",
)]
pub async fn create_users_with_list(
    State(state): State<AppState>,
    payload: Result<Json<Vec<UserInput>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(inputs) = payload?;
    RequestValidator::validate_users(&inputs)?;
    let users = UserService::create_many(&state.gateway, &inputs).await?;
    Ok(response::ok(users))
}

#[utoipa::path(
    put,
    path = "/user/{username}",
    params(("username" = String, Path, description = "Username")),
    request_body = UserInput,
    responses(
        (status = 200, description = "Stored user after the update", body = User),
        (status = 404, description = "User not found"),
    ),
    tag = "user",
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let user = UserService::update(&state.gateway, &username, &input).await?;
    Ok(response::ok(user))
}

#[utoipa::path(
    delete,
    path = "/user/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User deleted", body = MessageBody),
        (status = 404, description = "User not found"),
    ),
    tag = "user",
)]
pub async fn delete_user(State(state): State<AppState>, Path(username): Path<String>) -> Result<impl IntoResponse, AppError> {
    UserService::delete(&state.gateway, &username).await?;
    Ok(response::message(format!(
        "User with username {} has been deleted successfully.",
        username
    )))
}
