//! Mapping from [`HauldeskError`] to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hauldesk_core::error::HauldeskError;
use serde::Serialize;

/// JSON error body. `message` never carries internal detail for 5xx
/// outcomes.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Wrapper making [`HauldeskError`] usable as a handler error.
#[derive(Debug)]
pub struct ApiError(pub HauldeskError);

impl From<HauldeskError> for ApiError {
    fn from(err: HauldeskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self.0 {
            HauldeskError::AuthenticationFailed { reason } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", reason.clone())
            }
            HauldeskError::RoleDenied { .. } => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "insufficient permissions".to_string(),
            ),
            // All tenant-guard failures read as a plain not-found so
            // tenant existence is not leaked.
            HauldeskError::BusinessNotFound { .. }
            | HauldeskError::BusinessInactive { .. }
            | HauldeskError::BusinessForbidden => (
                StatusCode::NOT_FOUND,
                "not_found",
                "resource not found".to_string(),
            ),
            HauldeskError::NotFound { entity, .. } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{entity} not found"),
            ),
            HauldeskError::AlreadyExists { entity } => (
                StatusCode::CONFLICT,
                "conflict",
                format!("{entity} already exists"),
            ),
            HauldeskError::Validation { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation", message.clone())
            }
            HauldeskError::Storage(e) | HauldeskError::Crypto(e) | HauldeskError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: HauldeskError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn auth_failures_are_401() {
        assert_eq!(
            status_of(HauldeskError::AuthenticationFailed {
                reason: "expired".into()
            }),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn role_denials_are_403() {
        assert_eq!(
            status_of(HauldeskError::RoleDenied {
                reason: "nope".into()
            }),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn every_tenant_guard_failure_reads_as_404() {
        assert_eq!(
            status_of(HauldeskError::BusinessNotFound { id: 1 }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(HauldeskError::BusinessInactive { id: 1 }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(HauldeskError::BusinessForbidden),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_errors_do_not_leak_detail() {
        let resp = ApiError(HauldeskError::Storage("connection string xyz".into()));
        let resp = resp.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
