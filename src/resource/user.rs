use axum::{
    extract::{Extension, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::auth::AuthUser;
use crate::error::{error_handler, AppError, AppResult};
use crate::extractors::ApiJson;
use crate::models::{Listing, User, UserUpdate};
use crate::startup::AppState;

/// Reject the request unless the path names the requester
fn ensure_self(user: &AuthUser, id: &str, message: &str) -> AppResult<()> {
    if user.id != id {
        warn!("User {} attempted an operation on account {}", user.id, id);
        return Err(error_handler(StatusCode::UNAUTHORIZED, message));
    }
    Ok(())
}

fn user_not_found() -> AppError {
    error_handler(StatusCode::NOT_FOUND, "User not found")
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state
        .backend
        .find_user_by_id(&id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(user))
}

pub async fn get_user_listings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Listing>>> {
    ensure_self(&user, &id, "You can only view your own listings")?;

    let listings = state.backend.find_listings_by_user(&id).await?;
    Ok(Json(listings))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ApiJson(mut update): ApiJson<UserUpdate>,
) -> AppResult<Json<User>> {
    ensure_self(&user, &id, "Update not allowed")?;

    // A blank password field leaves the stored hash alone
    if let Some(password) = update.password.take().filter(|p| !p.is_empty()) {
        update.password = Some(state.passwords.hash_password(&password)?);
    }

    let updated = state
        .backend
        .update_user(&id, &update)
        .await?
        .ok_or_else(user_not_found)?;
    info!("User {} updated", id);

    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    ensure_self(&user, &id, "Not authorized")?;

    if !state.backend.delete_user(&id).await? {
        return Err(user_not_found());
    }
    info!("User {} deleted their account", id);

    let cookie = state.tokens.clear_cookie()?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json("Account deleted successfully"),
    )
        .into_response())
}
