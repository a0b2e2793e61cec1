//! Role gating against the static route table.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use hauldesk_access::RoleGate;
use hauldesk_core::error::HauldeskError;
use hauldesk_core::models::actor::Actor;
use hauldesk_core::repository::{
    AccountRepository, AuditLogRepository, BusinessRepository, VehicleRepository,
};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn enforce_policy<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    req: Request,
    next: Next,
) -> Response
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    let policy = state.routes.policy_for(req.method().as_str(), req.uri().path());
    if policy.public {
        return next.run(req).await;
    }

    // The resolver runs outside this layer; a missing actor here means
    // the request never authenticated.
    let Some(actor) = req.extensions().get::<Actor>() else {
        return ApiError(HauldeskError::AuthenticationFailed {
            reason: "unauthenticated".into(),
        })
        .into_response();
    };

    if !RoleGate::permit(actor, &policy.allowed_roles) {
        tracing::warn!(
            account_id = actor.account_id,
            role = actor.role.as_str(),
            method = %req.method(),
            path = req.uri().path(),
            "role check denied"
        );
        return ApiError(HauldeskError::RoleDenied {
            reason: format!("role {} not permitted here", actor.role.as_str()),
        })
        .into_response();
    }

    next.run(req).await
}
