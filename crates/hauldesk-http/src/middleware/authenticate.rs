//! Request identity resolution.
//!
//! Per-request state machine with two terminal outcomes: the request
//! proceeds carrying a resolved [`Actor`], or it is rejected with a
//! clean 401 before reaching any handler. An expired self-issued
//! credential gets at most one silent refresh retry through the token
//! lifecycle store; when that succeeds, the response carries the new
//! pair so the caller can update its stored tokens.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use hauldesk_auth::credential::{AuthScheme, Credential};
use hauldesk_auth::service::AuthOutput;
use hauldesk_core::error::HauldeskError;
use hauldesk_core::models::actor::Actor;
use hauldesk_core::repository::{
    AccountRepository, AuditLogRepository, BusinessRepository, VehicleRepository,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Response header carrying the new access credential after a silent
/// rotation.
pub const NEW_ACCESS_TOKEN_HEADER: &str = "x-new-access-token";
/// Response header carrying the new refresh credential after a silent
/// rotation.
pub const NEW_REFRESH_TOKEN_HEADER: &str = "x-new-refresh-token";

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

fn reject(reason: &str) -> Response {
    ApiError(HauldeskError::AuthenticationFailed {
        reason: reason.to_string(),
    })
    .into_response()
}

pub async fn authenticate<A, B, V, L>(
    State(state): State<AppState<A, B, V, L>>,
    mut req: Request,
    next: Next,
) -> Response
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    // 1. Public routes short-circuit: authenticated with no actor.
    let policy = state.routes.policy_for(req.method().as_str(), req.uri().path());
    if policy.public {
        return next.run(req).await;
    }
    let scheme = policy.scheme;

    // 2. No credential, no entry.
    let Some(token) = bearer_token(&req) else {
        return reject("missing bearer credential");
    };

    // 3. Verify, with one refresh retry for self-issued credentials.
    let credential = Credential::for_scheme(scheme, token.clone());
    let (actor, rotated) = match state.verifier.verify(&credential).await {
        Ok(actor) => (actor, None),
        Err(err) => match try_refresh(&state, scheme, &token).await {
            Some(result) => result,
            None => return ApiError(err).into_response(),
        },
    };

    // 4. Attach the actor and run the rest of the pipeline.
    req.extensions_mut().insert(actor.clone());
    let mut response = next.run(req).await;

    // The outermost audit layer attributes the request from response
    // extensions, so it never re-parses credentials.
    response.extensions_mut().insert(actor);

    if let Some(pair) = rotated {
        set_pair_headers(&mut response, &pair);
    }
    response
}

/// The silent refresh retry: only self-issued credentials participate
/// (external identity tokens are renewed by the client with its
/// provider), and only when the lifecycle store still holds a live pair
/// for the presented access credential. At most one retry; the retry
/// re-runs the full verifier so blocked/inactive checks are never
/// bypassed.
async fn try_refresh<A, B, V, L>(
    state: &AppState<A, B, V, L>,
    scheme: AuthScheme,
    access: &str,
) -> Option<(Actor, Option<AuthOutput>)>
where
    A: AccountRepository + Clone + 'static,
    B: BusinessRepository + Clone + 'static,
    V: VehicleRepository + Clone + 'static,
    L: AuditLogRepository + Clone + 'static,
{
    if scheme != AuthScheme::SelfIssued {
        return None;
    }
    let refresh = state.tokens.lookup_refresh(access)?;

    let pair = match state.auth.refresh(access, &refresh).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::debug!(error = %e, "silent refresh failed");
            return None;
        }
    };

    let credential = Credential::SelfIssued(pair.access_token.clone());
    match state.verifier.verify(&credential).await {
        Ok(actor) => {
            tracing::debug!(account_id = actor.account_id, "credential pair rotated");
            Some((actor, Some(pair)))
        }
        Err(e) => {
            tracing::debug!(error = %e, "verification failed after rotation");
            None
        }
    }
}

fn set_pair_headers(response: &mut Response, pair: &AuthOutput) {
    if let Ok(value) = HeaderValue::from_str(&pair.access_token) {
        response.headers_mut().insert(NEW_ACCESS_TOKEN_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&pair.refresh_token) {
        response
            .headers_mut()
            .insert(NEW_REFRESH_TOKEN_HEADER, value);
    }
}
