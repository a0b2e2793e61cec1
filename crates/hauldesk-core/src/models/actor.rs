//! Actor — the resolved identity for one request.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::account::{Account, Role};

/// The authenticated principal for a single request.
///
/// Constructed fresh per request from the durable [`Account`] record and
/// the verified credential, never persisted, and discarded when the
/// request completes. Role and admin flags come from the account record,
/// not from token claims, so a revoked privilege takes effect on the
/// next request.
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub account_id: i64,
    pub display_name: String,
    pub business_id: Option<i64>,
    pub role: Role,
    pub is_admin: bool,
    pub is_super_admin: bool,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Actor {
    /// Build an actor from a durable account and the credential's validity
    /// window.
    pub fn from_account(
        account: &Account,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account_id: account.id,
            display_name: account.display_name.clone(),
            business_id: account.business_id,
            role: account.role,
            is_admin: account.is_admin,
            is_super_admin: account.is_super_admin,
            issued_at,
            expires_at,
        }
    }
}
