//! Shared application state threaded through handlers and middleware.

use std::sync::Arc;

use hauldesk_access::{RouteTable, TenantAccessGuard};
use hauldesk_audit::AuditRecorder;
use hauldesk_auth::service::AuthService;
use hauldesk_auth::store::TokenStore;
use hauldesk_auth::verifier::CredentialVerifier;
use hauldesk_core::repository::{
    AccountRepository, AuditLogRepository, BusinessRepository, VehicleRepository,
};

/// Everything the pipeline needs, generic over the repository
/// implementations so the HTTP layer has no dependency on any
/// particular store.
pub struct AppState<A, B, V, L>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    pub verifier: Arc<CredentialVerifier<A, B>>,
    pub auth: Arc<AuthService<A, B>>,
    pub tokens: Arc<dyn TokenStore>,
    pub guard: Arc<TenantAccessGuard<B>>,
    pub vehicles: V,
    pub audit_logs: L,
    pub recorder: AuditRecorder,
    pub routes: Arc<RouteTable>,
}

impl<A, B, V, L> Clone for AppState<A, B, V, L>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            verifier: self.verifier.clone(),
            auth: self.auth.clone(),
            tokens: self.tokens.clone(),
            guard: self.guard.clone(),
            vehicles: self.vehicles.clone(),
            audit_logs: self.audit_logs.clone(),
            recorder: self.recorder.clone(),
            routes: self.routes.clone(),
        }
    }
}
