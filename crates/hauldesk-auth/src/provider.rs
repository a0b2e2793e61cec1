//! External identity provider integration.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AuthError;

/// Resolves a third-party identity token to a stable external subject id.
///
/// Object-safe so the verifier can hold whichever implementation the
/// deployment configures.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve_subject(&self, token: &str) -> Result<String, AuthError>;
}

/// Identity provider backed by an HTTP userinfo endpoint.
///
/// Forwards the bearer token and expects a JSON body carrying a `sub`
/// field, as OIDC userinfo endpoints do.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    userinfo_url: String,
}

impl HttpIdentityProvider {
    pub fn new(userinfo_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            userinfo_url: userinfo_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn resolve_subject(&self, token: &str) -> Result<String, AuthError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::TokenInvalid(format!("identity provider unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidCredentials);
        }

        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| AuthError::TokenInvalid(format!("malformed userinfo response: {e}")))?;

        Ok(info.sub)
    }
}

/// Fixed token → subject mapping. For local development and tests, where
/// no external provider is reachable.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    subjects: HashMap<String, String>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        self.subjects.insert(token.into(), subject.into());
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve_subject(&self, token: &str) -> Result<String, AuthError> {
        self.subjects
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)
    }
}
