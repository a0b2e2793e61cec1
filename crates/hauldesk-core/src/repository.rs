//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories take a
//! [`BusinessScope`] produced by the tenant access guard and must apply it
//! as a mandatory condition; no query may bypass it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HauldeskResult;
use crate::models::{
    account::{Account, CreateAccount},
    audit::{AuditAction, AuditEntity, AuditRecord, NewAuditRecord},
    business::{Business, CreateBusiness},
    vehicle::{CreateVehicle, Vehicle},
};

/// Hard cap on page size for list queries.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Pagination {
    /// Clamp the limit to [`MAX_PAGE_SIZE`]. A zero limit becomes one page
    /// of the default size.
    pub fn clamped(self) -> Self {
        let limit = match self.limit {
            0 => 50,
            n => n.min(MAX_PAGE_SIZE),
        };
        Self {
            offset: self.offset,
            limit,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// The tenant-id-bearing filter fragment every scoped query must include.
///
/// Produced only by the tenant access guard; data components never build
/// one from client input directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessScope {
    pub business_id: i64,
}

impl BusinessScope {
    /// Whether a record's business id falls inside this scope.
    pub fn matches(&self, business_id: Option<i64>) -> bool {
        business_id == Some(self.business_id)
    }
}

// ---------------------------------------------------------------------------
// Global-scope repositories
// ---------------------------------------------------------------------------

pub trait AccountRepository: Send + Sync {
    fn create(&self, input: CreateAccount) -> impl Future<Output = HauldeskResult<Account>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = HauldeskResult<Account>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = HauldeskResult<Account>> + Send;
    /// Look up the local account linked to an external identity subject.
    fn get_by_external_subject(
        &self,
        subject: &str,
    ) -> impl Future<Output = HauldeskResult<Account>> + Send;
    fn update_password(
        &self,
        id: i64,
        password_hash: String,
    ) -> impl Future<Output = HauldeskResult<()>> + Send;
    fn set_blocked(&self, id: i64, blocked: bool)
    -> impl Future<Output = HauldeskResult<()>> + Send;
}

pub trait BusinessRepository: Send + Sync {
    fn create(
        &self,
        input: CreateBusiness,
    ) -> impl Future<Output = HauldeskResult<Business>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = HauldeskResult<Business>> + Send;
    fn set_active(&self, id: i64, active: bool)
    -> impl Future<Output = HauldeskResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Tenant-scoped repositories
// ---------------------------------------------------------------------------

pub trait VehicleRepository: Send + Sync {
    fn create(
        &self,
        scope: BusinessScope,
        input: CreateVehicle,
    ) -> impl Future<Output = HauldeskResult<Vehicle>> + Send;
    fn list(
        &self,
        scope: BusinessScope,
        pagination: Pagination,
    ) -> impl Future<Output = HauldeskResult<PaginatedResult<Vehicle>>> + Send;
}

// ---------------------------------------------------------------------------
// Audit (append-only, tenant-scoped)
// ---------------------------------------------------------------------------

/// Query filters for audit records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogFilter {
    pub actor_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub entity: Option<AuditEntity>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

pub trait AuditLogRepository: Send + Sync {
    /// Append a new audit record. No update or delete operations exist.
    fn append(
        &self,
        input: NewAuditRecord,
    ) -> impl Future<Output = HauldeskResult<AuditRecord>> + Send;
    fn list(
        &self,
        scope: BusinessScope,
        filter: AuditLogFilter,
        pagination: Pagination,
    ) -> impl Future<Output = HauldeskResult<PaginatedResult<AuditRecord>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_limit_is_capped() {
        let p = Pagination {
            offset: 10,
            limit: 5_000,
        }
        .clamped();
        assert_eq!(p.limit, MAX_PAGE_SIZE);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let p = Pagination {
            offset: 0,
            limit: 0,
        }
        .clamped();
        assert_eq!(p.limit, 50);
    }

    #[test]
    fn scope_matches_only_its_business() {
        let scope = BusinessScope { business_id: 2 };
        assert!(scope.matches(Some(2)));
        assert!(!scope.matches(Some(1)));
        assert!(!scope.matches(None));
    }
}
