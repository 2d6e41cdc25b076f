use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};

use crate::auth::AuthUser;
use crate::error::{error_handler, AppResult};
use crate::extractors::{ApiJson, ApiQuery};
use crate::models::{Listing, ListingUpdate, NewListing};
use crate::parser::{ListingFilter, ListingQuery};
use crate::startup::AppState;

pub async fn create_listing(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(listing): ApiJson<NewListing>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref owner) = listing.user_id {
        if owner != &user.id {
            warn!("User {} tried to create a listing for {}", user.id, owner);
            return Err(error_handler(
                StatusCode::UNAUTHORIZED,
                "You can only create listings for your own account",
            ));
        }
    }

    let created = state.backend.create_listing(&user.id, &listing).await?;
    info!("Listing {} created by {}", created.id, user.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Listing>> {
    let listing = find_existing(&state, &id).await?;
    Ok(Json(listing))
}

pub async fn get_listings(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListingQuery>,
) -> AppResult<Json<Vec<Listing>>> {
    let filter = ListingFilter::from_query(&query);
    let listings = state.backend.find_listings(&filter).await?;
    Ok(Json(listings))
}

pub async fn update_listing(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<ListingUpdate>,
) -> AppResult<Json<Listing>> {
    let listing = find_existing(&state, &id).await?;
    if listing.user_id != user.id {
        warn!("User {} tried to update listing {} of {}", user.id, id, listing.user_id);
        return Err(error_handler(
            StatusCode::UNAUTHORIZED,
            "Only update your own listing",
        ));
    }

    let updated = state
        .backend
        .update_listing(&id, &update)
        .await?
        .ok_or_else(|| error_handler(StatusCode::NOT_FOUND, "Listing not found"))?;

    Ok(Json(updated))
}

pub async fn delete_listing(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<&'static str>> {
    let listing = find_existing(&state, &id).await?;
    if listing.user_id != user.id {
        warn!("User {} tried to delete listing {} of {}", user.id, id, listing.user_id);
        return Err(error_handler(
            StatusCode::UNAUTHORIZED,
            "Only delete your own listing",
        ));
    }

    if !state.backend.delete_listing(&id).await? {
        return Err(error_handler(StatusCode::NOT_FOUND, "Listing not found"));
    }
    info!("Listing {} deleted by {}", id, user.id);

    Ok(Json("Deleted successfully"))
}

async fn find_existing(state: &AppState, id: &str) -> AppResult<Listing> {
    state
        .backend
        .find_listing_by_id(id)
        .await?
        .ok_or_else(|| error_handler(StatusCode::NOT_FOUND, "Listing not found"))
}
