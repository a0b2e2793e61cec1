//! Audit record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed enumeration of auditable action kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Read,
    Update,
    Delete,
    Login,
    Logout,
    Signup,
    PasswordChange,
    ProfileUpdate,
    Custom,
}

/// Fixed enumeration of entity kinds an audit record can target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuditEntity {
    User,
    Parcel,
    Journey,
    CourierJourney,
    Vehicle,
    Business,
    CustomerProfile,
    DriverProfile,
    CourierProfile,
    Address,
    Country,
    Authentication,
    Unknown,
}

/// An immutable, append-only fact about one observed request.
///
/// Records are created once by the audit recorder and never mutated or
/// deleted by the application; retention is an operational concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: i64,
    /// Nullable for anonymous or system actions.
    pub actor_id: Option<i64>,
    pub action: AuditAction,
    pub entity: AuditEntity,
    pub entity_id: Option<i64>,
    pub description: String,
    /// Arbitrary payload: redacted request body, response summary, etc.
    pub metadata: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub request_id: String,
    pub method: String,
    pub endpoint: String,
    pub duration_ms: u64,
    pub status_code: u16,
    pub business_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Fields captured for a new audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditRecord {
    pub actor_id: Option<i64>,
    pub action: AuditAction,
    pub entity: AuditEntity,
    pub entity_id: Option<i64>,
    pub description: String,
    pub metadata: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub request_id: String,
    pub method: String,
    pub endpoint: String,
    pub duration_ms: u64,
    pub status_code: u16,
    pub business_id: Option<i64>,
}
