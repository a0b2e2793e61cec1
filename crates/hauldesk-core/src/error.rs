//! Error types for the HaulDesk system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HauldeskError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Role not permitted: {reason}")]
    RoleDenied { reason: String },

    #[error("Business not found: {id}")]
    BusinessNotFound { id: i64 },

    #[error("Business is inactive: {id}")]
    BusinessInactive { id: i64 },

    #[error("Actor may not operate on the requested business")]
    BusinessForbidden,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type HauldeskResult<T> = Result<T, HauldeskError>;
