//! In-memory implementation of [`VehicleRepository`].

use std::sync::Arc;

use chrono::Utc;
use hauldesk_core::error::HauldeskResult;
use hauldesk_core::models::vehicle::{CreateVehicle, Vehicle};
use hauldesk_core::repository::{BusinessScope, PaginatedResult, Pagination, VehicleRepository};
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct State {
    vehicles: Vec<Vehicle>,
    next_id: i64,
}

/// In-memory vehicle repository. The scope passed to each query is the
/// mandatory tenant condition; there is no unscoped access path.
#[derive(Clone, Default)]
pub struct MemVehicleRepository {
    state: Arc<RwLock<State>>,
}

impl MemVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VehicleRepository for MemVehicleRepository {
    async fn create(&self, scope: BusinessScope, input: CreateVehicle) -> HauldeskResult<Vehicle> {
        let mut state = self.state.write();
        state.next_id += 1;
        let now = Utc::now();
        let vehicle = Vehicle {
            id: state.next_id,
            business_id: scope.business_id,
            registration: input.registration,
            model: input.model,
            capacity_kg: input.capacity_kg,
            created_at: now,
            updated_at: now,
        };
        state.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn list(
        &self,
        scope: BusinessScope,
        pagination: Pagination,
    ) -> HauldeskResult<PaginatedResult<Vehicle>> {
        let pagination = pagination.clamped();
        let state = self.state.read();

        let matching: Vec<&Vehicle> = state
            .vehicles
            .iter()
            .filter(|v| scope.matches(Some(v.business_id)))
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect();

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(reg: &str) -> CreateVehicle {
        CreateVehicle {
            registration: reg.into(),
            model: "Sprinter".into(),
            capacity_kg: 1200,
        }
    }

    #[tokio::test]
    async fn created_vehicle_carries_the_scope_business() {
        let repo = MemVehicleRepository::new();
        let v = repo
            .create(BusinessScope { business_id: 7 }, input("AB-123"))
            .await
            .unwrap();
        assert_eq!(v.business_id, 7);
    }

    #[tokio::test]
    async fn list_never_crosses_the_scope() {
        let repo = MemVehicleRepository::new();
        repo.create(BusinessScope { business_id: 1 }, input("AA-111"))
            .await
            .unwrap();
        repo.create(BusinessScope { business_id: 2 }, input("BB-222"))
            .await
            .unwrap();

        let page = repo
            .list(BusinessScope { business_id: 1 }, Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].registration, "AA-111");
    }

    #[tokio::test]
    async fn list_paginates() {
        let repo = MemVehicleRepository::new();
        let scope = BusinessScope { business_id: 1 };
        for i in 0..5 {
            repo.create(scope, input(&format!("V-{i}"))).await.unwrap();
        }

        let page = repo
            .list(
                scope,
                Pagination {
                    offset: 3,
                    limit: 10,
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
    }
}
