//! Derivation of audit action, entity kind, and entity id from the
//! request method and path.
//!
//! The mappings are fixed tables; downstream consumers of the audit log
//! depend on them staying stable.

use hauldesk_core::models::audit::{AuditAction, AuditEntity};

/// The action kind for a request, from its method and path.
pub fn derive_action(method: &str, path: &str) -> AuditAction {
    let path = path.to_ascii_lowercase();
    match method {
        "POST" => {
            if path.contains("login") {
                AuditAction::Login
            } else if path.contains("signup") {
                AuditAction::Signup
            } else if path.contains("logout") {
                AuditAction::Logout
            } else {
                AuditAction::Create
            }
        }
        "PUT" | "PATCH" => {
            if path.contains("password") {
                AuditAction::PasswordChange
            } else if path.contains("profile") {
                AuditAction::ProfileUpdate
            } else {
                AuditAction::Update
            }
        }
        "DELETE" => AuditAction::Delete,
        "GET" => AuditAction::Read,
        _ => AuditAction::Custom,
    }
}

/// The entity kind targeted by a path, from its first segment.
pub fn derive_entity(path: &str) -> AuditEntity {
    let first = path
        .split('/')
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match first.as_str() {
        "users" => AuditEntity::User,
        "parcels" => AuditEntity::Parcel,
        "journeys" => AuditEntity::Journey,
        "courier-journeys" => AuditEntity::CourierJourney,
        "vehicles" => AuditEntity::Vehicle,
        "businesses" => AuditEntity::Business,
        "customers" => AuditEntity::CustomerProfile,
        "drivers" => AuditEntity::DriverProfile,
        "couriers" => AuditEntity::CourierProfile,
        "addresses" => AuditEntity::Address,
        "countries" => AuditEntity::Country,
        "auth" => AuditEntity::Authentication,
        _ => AuditEntity::Unknown,
    }
}

/// The first purely numeric path segment, if any.
pub fn derive_entity_id(path: &str) -> Option<i64> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .find(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_from_method_and_path() {
        assert_eq!(derive_action("POST", "/auth/login"), AuditAction::Login);
        assert_eq!(derive_action("POST", "/auth/signup"), AuditAction::Signup);
        assert_eq!(derive_action("POST", "/auth/logout"), AuditAction::Logout);
        assert_eq!(derive_action("POST", "/vehicles"), AuditAction::Create);
        assert_eq!(
            derive_action("PUT", "/users/5/password"),
            AuditAction::PasswordChange
        );
        assert_eq!(
            derive_action("PATCH", "/users/5/profile"),
            AuditAction::ProfileUpdate
        );
        assert_eq!(derive_action("PUT", "/vehicles/5"), AuditAction::Update);
        assert_eq!(derive_action("DELETE", "/vehicles/5"), AuditAction::Delete);
        assert_eq!(derive_action("GET", "/vehicles"), AuditAction::Read);
        assert_eq!(derive_action("OPTIONS", "/vehicles"), AuditAction::Custom);
    }

    #[test]
    fn every_entity_keyword_round_trips() {
        let table = [
            ("users", AuditEntity::User),
            ("parcels", AuditEntity::Parcel),
            ("journeys", AuditEntity::Journey),
            ("courier-journeys", AuditEntity::CourierJourney),
            ("vehicles", AuditEntity::Vehicle),
            ("businesses", AuditEntity::Business),
            ("customers", AuditEntity::CustomerProfile),
            ("drivers", AuditEntity::DriverProfile),
            ("couriers", AuditEntity::CourierProfile),
            ("addresses", AuditEntity::Address),
            ("countries", AuditEntity::Country),
            ("auth", AuditEntity::Authentication),
        ];
        for (keyword, expected) in table {
            assert_eq!(derive_entity(&format!("/{keyword}/42")), expected);
        }
    }

    #[test]
    fn first_segment_decides_the_entity() {
        assert_eq!(
            derive_entity("/courier-journeys/42/parcels"),
            AuditEntity::CourierJourney
        );
    }

    #[test]
    fn unmatched_path_is_unknown() {
        assert_eq!(derive_entity("/tariff-rates/3"), AuditEntity::Unknown);
        assert_eq!(derive_entity("/"), AuditEntity::Unknown);
    }

    #[test]
    fn entity_id_is_the_first_numeric_segment() {
        assert_eq!(derive_entity_id("/vehicles/42"), Some(42));
        assert_eq!(derive_entity_id("/courier-journeys/7/parcels/9"), Some(7));
        assert_eq!(derive_entity_id("/vehicles"), None);
        assert_eq!(derive_entity_id("/vehicles/abc123"), None);
    }
}
