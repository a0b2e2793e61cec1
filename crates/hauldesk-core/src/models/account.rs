//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed role enumeration for back-office accounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Dispatcher,
    Driver,
    Courier,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Dispatcher => "dispatcher",
            Role::Driver => "driver",
            Role::Courier => "courier",
            Role::Customer => "customer",
        }
    }
}

/// A durable back-office account.
///
/// `business_id` is assigned at creation and never reassigned; an account
/// without one is either a platform super admin or an orphan that every
/// tenant check rejects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub business_id: Option<i64>,
    pub display_name: String,
    pub email: String,
    /// Argon2id PHC-format hash. Empty for accounts provisioned through
    /// the external identity provider.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_admin: bool,
    pub is_super_admin: bool,
    pub blocked: bool,
    /// Stable subject id at the external identity provider, when linked.
    pub external_subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    pub business_id: Option<i64>,
    pub display_name: String,
    pub email: String,
    /// Argon2id PHC-format hash of the raw password, or empty when the
    /// account authenticates via the external identity provider.
    pub password_hash: String,
    pub role: Role,
    pub is_admin: bool,
    pub is_super_admin: bool,
    pub external_subject: Option<String>,
}
