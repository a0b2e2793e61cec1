//! Authentication error types.

use hauldesk_core::error::HauldeskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is blocked")]
    AccountBlocked,

    #[error("owning business is inactive")]
    BusinessInactive,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("token refresh failed")]
    RefreshFailed,

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for HauldeskError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::AccountBlocked
            | AuthError::BusinessInactive
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_)
            | AuthError::RefreshFailed => HauldeskError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::WeakPassword { .. } => HauldeskError::Validation {
                message: err.to_string(),
            },
            AuthError::Crypto(msg) => HauldeskError::Crypto(msg),
        }
    }
}
