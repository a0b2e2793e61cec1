//! Audit capture — the outermost layer.
//!
//! Measures duration, snapshots request and response bodies, derives
//! the audit event, and hands it to the recorder. Nothing in here can
//! fail the request: capture problems degrade to a smaller event, and
//! the recorder itself is fail-open.

use std::time::Instant;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use hauldesk_audit::{
    derive_action, derive_entity, derive_entity_id, redact_json, should_record,
    summarize_response,
};
use hauldesk_core::models::actor::Actor;
use hauldesk_core::models::audit::NewAuditRecord;
use hauldesk_core::repository::{
    AccountRepository, AuditLogRepository, BusinessRepository, VehicleRepository,
};
use http_body_util::BodyExt;
use serde_json::json;
use uuid::Uuid;

use crate::state::AppState;

/// Request bodies above this size are not captured.
const REQUEST_CAPTURE_LIMIT: u64 = 8 * 1024;

/// Request-scoped correlation id, available to handlers via extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(String::from)
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    // Behind the usual proxy setup the first forwarded hop is the
    // client.
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        return forwarded.split(',').next().map(|s| s.trim().to_string());
    }
    header_str(headers, header::HeaderName::from_static("x-real-ip"))
}

/// Whether the request body is small enough to buffer. Requests without
/// a declared length are never buffered, so streaming uploads are not
/// stalled by audit capture.
fn capturable_length(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .is_some_and(|n| n > 0 && n <= REQUEST_CAPTURE_LIMIT)
}

pub async fn capture_audit<A, B, V, L>(
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
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string();
    let ip_address = client_ip(req.headers());
    let user_agent = header_str(req.headers(), header::USER_AGENT);

    // Snapshot the request body when it is declared and small.
    let (mut parts, body) = req.into_parts();
    let (request_body, body) = if method != "GET" && capturable_length(&parts.headers) {
        match body.collect().await {
            Ok(collected) => {
                let bytes = collected.to_bytes();
                let parsed = serde_json::from_slice::<serde_json::Value>(&bytes).ok();
                (parsed, Body::from(bytes))
            }
            Err(_) => (None, Body::empty()),
        }
    } else {
        (None, body)
    };
    parts.extensions.insert(RequestId(request_id.clone()));
    let req = Request::from_parts(parts, body);

    let response = next.run(req).await;

    let status_code = response.status().as_u16();
    let duration_ms = started.elapsed().as_millis() as u64;

    if !should_record(&method, &path, status_code) {
        return response;
    }

    // Snapshot the response for the record, then hand it back intact.
    let (parts, body) = response.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => Default::default(),
    };
    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let actor = parts.extensions.get::<Actor>();
    let description = if status_code >= 400 {
        format!("FAILED: {method} {path}")
    } else {
        format!("{method} {path}")
    };

    let metadata = json!({
        "request": request_body.as_ref().map(redact_json),
        "response": summarize_response(&bytes, content_type),
    });

    state.recorder.record(NewAuditRecord {
        actor_id: actor.map(|a| a.account_id),
        action: derive_action(&method, &path),
        entity: derive_entity(&path),
        entity_id: derive_entity_id(&path),
        description,
        metadata,
        ip_address,
        user_agent,
        request_id,
        method,
        endpoint: path,
        duration_ms,
        status_code,
        business_id: actor.and_then(|a| a.business_id),
    });

    Response::from_parts(parts, Body::from(bytes))
}
