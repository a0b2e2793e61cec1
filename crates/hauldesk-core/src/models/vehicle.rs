//! Vehicle domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fleet vehicle, scoped to one business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub business_id: i64,
    pub registration: String,
    pub model: String,
    pub capacity_kg: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVehicle {
    pub registration: String,
    pub model: String,
    pub capacity_kg: u32,
}
