//! In-memory implementation of [`BusinessRepository`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use hauldesk_core::error::{HauldeskError, HauldeskResult};
use hauldesk_core::models::business::{Business, CreateBusiness};
use hauldesk_core::repository::BusinessRepository;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct State {
    businesses: HashMap<i64, Business>,
    next_id: i64,
}

/// In-memory business repository.
#[derive(Clone, Default)]
pub struct MemBusinessRepository {
    state: Arc<RwLock<State>>,
}

impl MemBusinessRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BusinessRepository for MemBusinessRepository {
    async fn create(&self, input: CreateBusiness) -> HauldeskResult<Business> {
        let mut state = self.state.write();
        state.next_id += 1;
        let now = Utc::now();
        let business = Business {
            id: state.next_id,
            name: input.name,
            active: true,
            created_at: now,
            updated_at: now,
        };
        state.businesses.insert(business.id, business.clone());
        Ok(business)
    }

    async fn get_by_id(&self, id: i64) -> HauldeskResult<Business> {
        self.state
            .read()
            .businesses
            .get(&id)
            .cloned()
            .ok_or_else(|| HauldeskError::NotFound {
                entity: "business".into(),
                id: id.to_string(),
            })
    }

    async fn set_active(&self, id: i64, active: bool) -> HauldeskResult<()> {
        let mut state = self.state.write();
        let business = state
            .businesses
            .get_mut(&id)
            .ok_or_else(|| HauldeskError::NotFound {
                entity: "business".into(),
                id: id.to_string(),
            })?;
        business.active = active;
        business.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_business_starts_active() {
        let repo = MemBusinessRepository::new();
        let b = repo
            .create(CreateBusiness {
                name: "Acme Freight".into(),
            })
            .await
            .unwrap();
        assert!(b.active);
    }

    #[tokio::test]
    async fn set_active_toggles() {
        let repo = MemBusinessRepository::new();
        let b = repo
            .create(CreateBusiness {
                name: "Acme Freight".into(),
            })
            .await
            .unwrap();
        repo.set_active(b.id, false).await.unwrap();
        assert!(!repo.get_by_id(b.id).await.unwrap().active);
    }

    #[tokio::test]
    async fn missing_business_is_not_found() {
        let repo = MemBusinessRepository::new();
        let err = repo.get_by_id(999).await.unwrap_err();
        assert!(matches!(err, HauldeskError::NotFound { .. }));
    }
}
