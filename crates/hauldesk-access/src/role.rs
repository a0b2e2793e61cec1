//! Role gate — declarative per-route role allow-lists.

use hauldesk_core::models::account::Role;
use hauldesk_core::models::actor::Actor;

/// Checks an actor against a route's role allow-list.
pub struct RoleGate;

impl RoleGate {
    /// Whether `actor` passes a route restricted to `allowed` roles.
    ///
    /// An empty allow-list means "any authenticated actor" — routes opt
    /// into restriction by naming roles, never by omission. The admin
    /// flag bypasses every role check.
    pub fn permit(actor: &Actor, allowed: &[Role]) -> bool {
        if allowed.is_empty() {
            return true;
        }
        if actor.is_admin {
            return true;
        }
        allowed.contains(&actor.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn actor(role: Role, is_admin: bool) -> Actor {
        let now = Utc::now();
        Actor {
            account_id: 1,
            display_name: "Test".into(),
            business_id: Some(1),
            role,
            is_admin,
            is_super_admin: false,
            issued_at: now,
            expires_at: now,
        }
    }

    #[test]
    fn listed_role_passes() {
        let a = actor(Role::Dispatcher, false);
        assert!(RoleGate::permit(&a, &[Role::Dispatcher, Role::Manager]));
    }

    #[test]
    fn unlisted_role_is_denied() {
        let a = actor(Role::Driver, false);
        assert!(!RoleGate::permit(&a, &[Role::Dispatcher, Role::Manager]));
    }

    #[test]
    fn admin_flag_bypasses_any_list() {
        let a = actor(Role::Customer, true);
        assert!(RoleGate::permit(&a, &[Role::Manager]));
    }

    #[test]
    fn empty_list_admits_any_authenticated_actor() {
        let a = actor(Role::Customer, false);
        assert!(RoleGate::permit(&a, &[]));
    }
}
