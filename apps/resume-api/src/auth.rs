//! Bearer-token verification against the identity provider.
//!
//! This service never inspects token contents itself; the identity service
//! owns key material and session semantics. All we need back is a stable
//! user id.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use reqwest::Client;
use serde::Deserialize;

use crate::errors::AppError;

/// Narrow seam to the identity provider: bearer token in, user id out.
/// Carried in `AppState` as `Arc<dyn TokenVerifier>` so tests can
/// substitute a stub.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, bearer_token: &str) -> Result<String, AppError>;
}

#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: String,
}

/// Verifies tokens by forwarding them to the identity service's `/user`
/// endpoint. Any non-success status means the token is rejected.
pub struct HttpTokenVerifier {
    client: Client,
    identity_url: String,
}

impl HttpTokenVerifier {
    pub fn new(identity_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("failed to build HTTP client"),
            identity_url,
        }
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify(&self, bearer_token: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(format!("{}/user", self.identity_url))
            .bearer_auth(bearer_token)
            .send()
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized);
        }

        let user: IdentityUser = response.json().await.map_err(|_| AppError::Unauthorized)?;
        Ok(user.id)
    }
}

/// Pulls the bearer token out of an `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)
}
