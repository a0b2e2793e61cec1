//! Tenant access guard — the one place cross-tenant policy lives.

use hauldesk_core::error::{HauldeskError, HauldeskResult};
use hauldesk_core::models::actor::Actor;
use hauldesk_core::repository::{BusinessRepository, BusinessScope};

/// Decides whether an actor may operate on a target business, and
/// produces the scope filter data components must apply.
///
/// Injected into data-access components as a plain helper; entity code
/// never builds a [`BusinessScope`] from client input directly. Every
/// failure here surfaces as a not-found-style outcome at the HTTP layer
/// so tenant existence is never leaked.
pub struct TenantAccessGuard<B: BusinessRepository> {
    businesses: B,
}

impl<B: BusinessRepository> TenantAccessGuard<B> {
    pub fn new(businesses: B) -> Self {
        Self { businesses }
    }

    /// Assert that `actor` may operate on `target_business_id`.
    ///
    /// Super admins may cross into any existing business, whatever its
    /// activity state. Everyone else must target their own business,
    /// which must exist and be active.
    pub async fn assert_access(&self, target_business_id: i64, actor: &Actor) -> HauldeskResult<()> {
        let business = match self.businesses.get_by_id(target_business_id).await {
            Ok(b) => b,
            Err(HauldeskError::NotFound { .. }) => {
                return Err(HauldeskError::BusinessNotFound {
                    id: target_business_id,
                });
            }
            Err(e) => return Err(e),
        };

        if actor.is_super_admin {
            return Ok(());
        }

        if actor.business_id != Some(target_business_id) {
            tracing::warn!(
                account_id = actor.account_id,
                target_business_id,
                "cross-tenant access denied"
            );
            return Err(HauldeskError::BusinessForbidden);
        }

        if !business.active {
            return Err(HauldeskError::BusinessInactive {
                id: target_business_id,
            });
        }

        Ok(())
    }

    /// The scope filter for a query targeting `target_business_id`.
    ///
    /// For a super admin the filter carries the *target* id verbatim
    /// (cross-tenant operation). For everyone else it always carries the
    /// actor's own business id, whatever was requested — a client-supplied
    /// tenant id is never trusted. An actor with no business id and no
    /// super-admin flag is denied outright rather than given an
    /// impossible filter.
    pub async fn scope_filter(
        &self,
        target_business_id: i64,
        actor: &Actor,
    ) -> HauldeskResult<BusinessScope> {
        self.assert_access(target_business_id, actor).await?;

        if actor.is_super_admin {
            return Ok(BusinessScope {
                business_id: target_business_id,
            });
        }

        match actor.business_id {
            Some(business_id) => Ok(BusinessScope { business_id }),
            None => Err(HauldeskError::BusinessForbidden),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hauldesk_core::models::account::Role;
    use hauldesk_core::models::business::CreateBusiness;
    use hauldesk_store_mem::MemBusinessRepository;

    fn actor(business_id: Option<i64>, is_super_admin: bool) -> Actor {
        let now = Utc::now();
        Actor {
            account_id: 1,
            display_name: "Test".into(),
            business_id,
            role: Role::Dispatcher,
            is_admin: false,
            is_super_admin,
            issued_at: now,
            expires_at: now,
        }
    }

    /// One active business (id 1) and one inactive (id 2).
    async fn setup() -> TenantAccessGuard<MemBusinessRepository> {
        let businesses = MemBusinessRepository::new();
        businesses
            .create(CreateBusiness {
                name: "Active Co".into(),
            })
            .await
            .unwrap();
        let inactive = businesses
            .create(CreateBusiness {
                name: "Dormant Co".into(),
            })
            .await
            .unwrap();
        businesses.set_active(inactive.id, false).await.unwrap();
        TenantAccessGuard::new(businesses)
    }

    #[tokio::test]
    async fn same_tenant_actor_is_allowed() {
        let guard = setup().await;
        let actor = actor(Some(1), false);
        guard.assert_access(1, &actor).await.unwrap();
        let scope = guard.scope_filter(1, &actor).await.unwrap();
        assert_eq!(scope.business_id, 1);
    }

    #[tokio::test]
    async fn cross_tenant_actor_is_forbidden() {
        let guard = setup().await;
        let actor = actor(Some(1), false);
        let err = guard.assert_access(2, &actor).await.unwrap_err();
        assert!(matches!(err, HauldeskError::BusinessForbidden));
    }

    #[tokio::test]
    async fn inactive_business_is_rejected_for_its_own_actor() {
        let guard = setup().await;
        let actor = actor(Some(2), false);
        let err = guard.assert_access(2, &actor).await.unwrap_err();
        assert!(matches!(err, HauldeskError::BusinessInactive { id: 2 }));
    }

    #[tokio::test]
    async fn missing_business_is_not_found() {
        let guard = setup().await;
        let actor = actor(Some(1), false);
        let err = guard.assert_access(99, &actor).await.unwrap_err();
        // NotFound even though the real failure is a tenant mismatch:
        // existence is checked first and 99 does not exist.
        assert!(matches!(err, HauldeskError::BusinessNotFound { id: 99 }));
    }

    #[tokio::test]
    async fn super_admin_crosses_tenants() {
        let guard = setup().await;
        let actor = actor(Some(1), true);
        let scope = guard.scope_filter(2, &actor).await.unwrap();
        // Filter carries the target, not the actor's own business.
        assert_eq!(scope.business_id, 2);
    }

    #[tokio::test]
    async fn super_admin_reaches_inactive_businesses() {
        let guard = setup().await;
        let actor = actor(None, true);
        guard.assert_access(2, &actor).await.unwrap();
    }

    #[tokio::test]
    async fn super_admin_still_needs_an_existing_target() {
        let guard = setup().await;
        let actor = actor(None, true);
        let err = guard.assert_access(99, &actor).await.unwrap_err();
        assert!(matches!(err, HauldeskError::BusinessNotFound { id: 99 }));
    }

    #[tokio::test]
    async fn orphaned_actor_is_always_denied() {
        let guard = setup().await;
        let actor = actor(None, false);
        let err = guard.scope_filter(1, &actor).await.unwrap_err();
        assert!(matches!(err, HauldeskError::BusinessForbidden));
    }
}
