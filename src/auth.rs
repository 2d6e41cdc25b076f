use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// Identity of the requester, decoded from the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix epoch seconds)
    pub iat: i64,
    /// Expiration (Unix epoch seconds)
    pub exp: i64,
}

/// Issues and validates HS256 session tokens and builds the matching cookies
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    cookie_name: String,
    secure_cookie: bool,
}

impl TokenManager {
    pub fn new(secret: &str, ttl: Duration, cookie_name: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            cookie_name: cookie_name.into(),
            secure_cookie: false,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let mut manager = Self::new(
            &config.jwt_secret,
            Duration::hours(config.token_ttl_hours),
            config.cookie_name.clone(),
        );
        manager.secure_cookie = config.secure_cookie;
        manager
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Sign a token for the given user
    pub fn issue(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify signature and expiry, returning the claims
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Forbidden(format!("Invalid session token: {}", e)))
    }

    /// `Set-Cookie` value carrying a fresh session token
    pub fn session_cookie(&self, token: &str) -> AppResult<HeaderValue> {
        self.cookie_header(token, self.ttl.num_seconds())
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear_cookie(&self) -> AppResult<HeaderValue> {
        self.cookie_header("", 0)
    }

    fn cookie_header(&self, value: &str, max_age: i64) -> AppResult<HeaderValue> {
        let mut cookie = format!(
            "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
            self.cookie_name, value, max_age
        );
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))
    }

    /// Find the session token among the request's `Cookie` headers
    pub fn token_from_headers<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, token)| token)
            .filter(|token| !token.is_empty())
    }
}

/// Authentication middleware for the protected routes
///
/// A missing cookie is 401, a cookie that fails validation is 403.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = tokens.token_from_headers(request.headers()) else {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    };

    let claims = tokens.validate(token).map_err(|e| {
        tracing::debug!("Rejected session token: {}", e);
        AppError::Forbidden("Forbidden".to_string())
    })?;

    // Store the identity in request extensions for handlers to use
    request.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Extension, Router};
    use axum_test::TestServer;

    fn manager() -> TokenManager {
        TokenManager::new("test-secret", Duration::hours(1), "user_token")
    }

    #[test]
    fn test_issue_and_validate() {
        let tokens = manager();
        let token = tokens.issue("user-1").unwrap();
        let claims = tokens.validate(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_rejects_foreign_and_expired_tokens() {
        let tokens = manager();

        let other = TokenManager::new("other-secret", Duration::hours(1), "user_token");
        let foreign = other.issue("user-1").unwrap();
        assert!(matches!(tokens.validate(&foreign), Err(AppError::Forbidden(_))));

        let expired = TokenManager::new("test-secret", Duration::hours(-2), "user_token")
            .issue("user-1")
            .unwrap();
        assert!(matches!(tokens.validate(&expired), Err(AppError::Forbidden(_))));

        assert!(tokens.validate("not.a.token").is_err());
    }

    #[test]
    fn test_cookie_headers() {
        let tokens = manager();

        let cookie = tokens.session_cookie("abc").unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "user_token=abc; HttpOnly; Path=/; SameSite=Lax; Max-Age=3600"
        );

        let cleared = tokens.clear_cookie().unwrap();
        assert!(cleared.to_str().unwrap().starts_with("user_token=;"));
        assert!(cleared.to_str().unwrap().ends_with("Max-Age=0"));
    }

    #[test]
    fn test_token_from_headers() {
        let tokens = manager();
        let mut headers = HeaderMap::new();
        assert_eq!(tokens.token_from_headers(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; user_token=xyz; lang=en"),
        );
        assert_eq!(tokens.token_from_headers(&headers), Some("xyz"));

        headers.insert(header::COOKIE, HeaderValue::from_static("user_token="));
        assert_eq!(tokens.token_from_headers(&headers), None);
    }

    #[tokio::test]
    async fn test_auth_middleware() {
        let tokens = Arc::new(manager());
        let app = Router::new()
            .route(
                "/me",
                get(|Extension(user): Extension<AuthUser>| async move { user.id }),
            )
            .route_layer(middleware::from_fn_with_state(
                tokens.clone(),
                auth_middleware,
            ));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/me").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Unauthorized");

        let response = server
            .get("/me")
            .add_header(header::COOKIE, HeaderValue::from_static("user_token=garbage"))
            .await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

        let cookie = format!("user_token={}", tokens.issue("user-42").unwrap());
        let response = server
            .get("/me")
            .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.text(), "user-42");
    }
}
