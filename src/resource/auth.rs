use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use crate::error::{error_handler, AppResult};
use crate::extractors::ApiJson;
use crate::models::{SignInRequest, SignUpRequest};
use crate::startup::AppState;

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignUpRequest>,
) -> AppResult<impl IntoResponse> {
    let password_hash = state.passwords.hash_password(&request.password)?;
    let user = state
        .backend
        .create_user(&request.username, &request.email, &password_hash)
        .await?;
    info!("User {} signed up", user.id);

    Ok((StatusCode::CREATED, Json("User created successfully")))
}

pub async fn signin(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignInRequest>,
) -> AppResult<Response> {
    let user = state
        .backend
        .find_user_by_email(&request.email)
        .await?
        .ok_or_else(|| error_handler(StatusCode::NOT_FOUND, "User not found"))?;

    if !state
        .passwords
        .verify_password(&request.password, &user.password)?
    {
        debug!("Wrong password for user {}", user.id);
        return Err(error_handler(StatusCode::UNAUTHORIZED, "Wrong credentials"));
    }

    let token = state.tokens.issue(&user.id)?;
    let cookie = state.tokens.session_cookie(&token)?;
    info!("User {} signed in", user.id);

    Ok(([(header::SET_COOKIE, cookie)], Json(user)).into_response())
}

pub async fn signout(State(state): State<AppState>) -> AppResult<Response> {
    let cookie = state.tokens.clear_cookie()?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json("User has been logged out!"),
    )
        .into_response())
}
