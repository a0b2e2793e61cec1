//! Business domain model.
//!
//! A business is the tenant boundary: every scoped entity (account,
//! vehicle, journey, parcel, audit record) carries exactly one business
//! id, assigned at creation and never reassigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,
    pub name: String,
    /// Inactive businesses reject every non-super-admin operation.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBusiness {
    pub name: String,
}
