use axum::{
    extract::State,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::auth::{auth_middleware, TokenManager};
use crate::backend::{BackendFactory, EstateBackend};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::logging::logging_middleware;
use crate::password::PasswordManager;
use crate::resource;

/// Shared, immutable per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn EstateBackend>,
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenManager>,
    pub passwords: Arc<PasswordManager>,
}

impl AppState {
    pub fn new(backend: Arc<dyn EstateBackend>, config: AppConfig) -> AppResult<Self> {
        let tokens = TokenManager::from_config(&config.auth);
        let passwords = PasswordManager::from_config(&config.password)?;

        Ok(Self {
            backend,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            passwords: Arc::new(passwords),
        })
    }
}

/// Connect the configured database and create its schema
pub async fn setup_backend(config: &AppConfig) -> AppResult<Arc<dyn EstateBackend>> {
    let backend_config = config.database_backend_config()?;

    tracing::info!(
        "Setting up {:?} backend (max {} connections)",
        backend_config.database_type,
        backend_config.max_connections
    );

    BackendFactory::create(&backend_config).await
}

/// Build the full application for a configuration
pub async fn build_app(config: AppConfig) -> AppResult<Router> {
    config.validate()?;
    let backend = setup_backend(&config).await?;
    let state = AppState::new(backend, config)?;
    Ok(build_router(state))
}

/// All routes; the protected ones sit behind the session cookie check
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/auth/signup", post(resource::auth::signup))
        .route("/api/auth/signin", post(resource::auth::signin))
        .route("/api/auth/signout", get(resource::auth::signout))
        .route("/api/listing/get", get(resource::listing::get_listings))
        .route("/api/listing/get/{id}", get(resource::listing::get_listing));

    let protected = Router::new()
        .route("/api/listing/create", post(resource::listing::create_listing))
        .route(
            "/api/listing/update/{id}",
            post(resource::listing::update_listing),
        )
        .route(
            "/api/listing/delete/{id}",
            delete(resource::listing::delete_listing),
        )
        .route("/api/user/{id}", get(resource::user::get_user))
        .route(
            "/api/user/listings/{id}",
            get(resource::user::get_user_listings),
        )
        .route("/api/user/update/{id}", post(resource::user::update_user))
        .route("/api/user/delete/{id}", delete(resource::user::delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ));

    public
        .merge(protected)
        .route("/health", get(health))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state.backend.health_check().await?;
    Ok(Json(json!({"status": "ok"})))
}
