//! The handler surface exercising the access-control core.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use hauldesk_auth::service::{SignInInput, SignUpInput};
use hauldesk_core::error::HauldeskError;
use hauldesk_core::models::account::Role;
use hauldesk_core::models::actor::Actor;
use hauldesk_core::models::audit::{AuditAction, AuditEntity, AuditRecord};
use hauldesk_core::models::vehicle::{CreateVehicle, Vehicle};
use hauldesk_core::repository::{
    AccountRepository, AuditLogFilter, AuditLogRepository, BusinessRepository, BusinessScope,
    PaginatedResult, Pagination, VehicleRepository,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub business_id: Option<i64>,
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

impl From<hauldesk_auth::service::AuthOutput> for TokenResponse {
    fn from(out: hauldesk_auth::service::AuthOutput) -> Self {
        Self {
            access_token: out.access_token,
            refresh_token: out.refresh_token,
            token_type: "Bearer",
            expires_in: out.expires_in,
        }
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn sign_up<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    Json(body): Json<SignUpRequest>,
) -> Result<Json<TokenResponse>, ApiError>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    let out = state
        .auth
        .sign_up(SignUpInput {
            business_id: body.business_id,
            display_name: body.display_name,
            email: body.email,
            password: body.password,
            role: body.role,
        })
        .await?;
    Ok(Json(out.into()))
}

pub async fn sign_in<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    Json(body): Json<SignInRequest>,
) -> Result<Json<TokenResponse>, ApiError>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    let out = state
        .auth
        .sign_in(SignInInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(out.into()))
}

pub async fn refresh<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    let out = state
        .auth
        .refresh(&body.access_token, &body.refresh_token)
        .await?;
    Ok(Json(out.into()))
}

pub async fn sign_out<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    Extension(actor): Extension<Actor>,
) -> Json<serde_json::Value>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    // Dropping every pair covers the case where the presented credential
    // was silently rotated earlier in this same request.
    state.auth.revoke_all(actor.account_id);
    Json(serde_json::json!({ "signed_out": true }))
}

/// The target business for a tenant-scoped request: the explicit query
/// parameter when given, otherwise the actor's own business. Super
/// admins must name a target; there is no implicit "all tenants" view.
fn target_business(actor: &Actor, requested: Option<i64>) -> Result<i64, HauldeskError> {
    requested
        .or(actor.business_id)
        .ok_or(HauldeskError::Validation {
            message: "business_id is required".into(),
        })
}

#[derive(Debug, Deserialize)]
pub struct VehicleListQuery {
    pub business_id: Option<i64>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

pub async fn list_vehicles<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<PaginatedResult<Vehicle>>, ApiError>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    let target = target_business(&actor, query.business_id)?;
    let scope = state.guard.scope_filter(target, &actor).await?;
    let page = state
        .vehicles
        .list(
            scope,
            Pagination {
                offset: query.offset,
                limit: query.limit,
            },
        )
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub business_id: Option<i64>,
    pub registration: String,
    pub model: String,
    pub capacity_kg: u32,
}

pub async fn create_vehicle<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<CreateVehicleRequest>,
) -> Result<Json<Vehicle>, ApiError>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    let target = target_business(&actor, body.business_id)?;
    let scope = state.guard.scope_filter(target, &actor).await?;
    let vehicle = state
        .vehicles
        .create(
            scope,
            CreateVehicle {
                registration: body.registration,
                model: body.model,
                capacity_kg: body.capacity_kg,
            },
        )
        .await?;
    Ok(Json(vehicle))
}

#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    pub business_id: Option<i64>,
    pub actor_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub entity: Option<AuditEntity>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

pub async fn list_audit_logs<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<PaginatedResult<AuditRecord>>, ApiError>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    let target = target_business(&actor, query.business_id)?;
    let scope: BusinessScope = state.guard.scope_filter(target, &actor).await?;
    let page = state
        .audit_logs
        .list(
            scope,
            AuditLogFilter {
                actor_id: query.actor_id,
                action: query.action,
                entity: query.entity,
                from: query.from,
                to: query.to,
            },
            Pagination {
                offset: query.offset,
                limit: query.limit,
            },
        )
        .await?;
    Ok(Json(page))
}
