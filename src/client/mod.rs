//! Typed HTTP client for the listing API
//!
//! Mirrors what the browser frontend does: it keeps the session cookie
//! between calls and drives the sign-up / sign-in forms in [`forms`].

pub mod forms;

use serde::Serialize;
use serde_json::Value;

use crate::models::Listing;

/// Thin wrapper over a cookie-keeping `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and return the JSON response, whatever its status
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, reqwest::Error> {
        self.http
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .json()
            .await
    }

    /// Search listings with raw query parameters
    pub async fn get_listings(
        &self,
        query: &[(&str, &str)],
    ) -> Result<Vec<Listing>, reqwest::Error> {
        self.http
            .get(self.url("/api/listing/get"))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn get_listing(&self, id: &str) -> Result<Listing, reqwest::Error> {
        self.http
            .get(self.url(&format!("/api/listing/get/{}", id)))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn sign_out(&self) -> Result<Value, reqwest::Error> {
        self.http
            .get(self.url("/api/auth/signout"))
            .send()
            .await?
            .json()
            .await
    }
}
