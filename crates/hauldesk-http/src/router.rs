//! Router assembly: routes, the default policy table, and the
//! middleware stack.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use hauldesk_access::{RoutePolicy, RouteTable};
use hauldesk_core::models::account::Role;
use hauldesk_core::repository::{
    AccountRepository, AuditLogRepository, BusinessRepository, VehicleRepository,
};

use crate::handlers;
use crate::middleware::{authenticate, capture_audit, enforce_policy};
use crate::state::AppState;

/// The policy table matching [`router`]'s routes.
///
/// Listed explicitly, one entry per route: which are public, which
/// credential scheme applies, and which roles may pass. Anything not
/// listed falls back to authenticated-any-role.
pub fn default_route_table() -> RouteTable {
    RouteTable::new(vec![
        RoutePolicy::public("GET", "/health"),
        RoutePolicy::public("POST", "/auth/signup"),
        RoutePolicy::public("POST", "/auth/login"),
        RoutePolicy::public("POST", "/auth/refresh"),
        RoutePolicy::authenticated("POST", "/auth/logout"),
        RoutePolicy::authenticated("GET", "/vehicles"),
        RoutePolicy::authenticated("POST", "/vehicles")
            .with_roles(&[Role::Manager, Role::Dispatcher]),
        RoutePolicy::authenticated("GET", "/audit-logs").with_roles(&[Role::Admin]),
    ])
}

/// Build the application router around `state`.
///
/// Layer order matters: audit capture is outermost so it observes
/// authentication failures too; policy enforcement is innermost, after
/// the actor is resolved.
pub fn router<A, B, V, L>(state: AppState<A, B, V, L>) -> Router
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/signup", post(handlers::sign_up))
        .route("/auth/login", post(handlers::sign_in))
        .route("/auth/refresh", post(handlers::refresh))
        .route("/auth/logout", post(handlers::sign_out))
        .route(
            "/vehicles",
            get(handlers::list_vehicles).post(handlers::create_vehicle),
        )
        .route("/audit-logs", get(handlers::list_audit_logs))
        .layer(from_fn_with_state(state.clone(), enforce_policy))
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(from_fn_with_state(state.clone(), capture_audit))
        .with_state(state)
}
