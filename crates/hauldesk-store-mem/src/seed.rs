//! First-run seed data for a fresh in-memory store.

use hauldesk_core::error::HauldeskResult;
use hauldesk_core::models::account::{Account, CreateAccount, Role};
use hauldesk_core::models::business::{Business, CreateBusiness};
use hauldesk_core::models::vehicle::CreateVehicle;
use hauldesk_core::repository::{
    AccountRepository, BusinessRepository, BusinessScope, VehicleRepository,
};

use crate::{MemAccountRepository, MemBusinessRepository, MemVehicleRepository};

/// What [`seed`] created.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub business: Business,
    pub admin: Account,
    pub super_admin: Account,
}

/// Populate a fresh store with one business, a tenant admin, a platform
/// super admin, and a couple of vehicles.
///
/// Password hashes are supplied by the caller so this crate stays free of
/// the crypto stack.
pub async fn seed(
    accounts: &MemAccountRepository,
    businesses: &MemBusinessRepository,
    vehicles: &MemVehicleRepository,
    admin_password_hash: String,
    super_admin_password_hash: String,
) -> HauldeskResult<SeedData> {
    let business = businesses
        .create(CreateBusiness {
            name: "Acme Freight".into(),
        })
        .await?;

    let admin = accounts
        .create(CreateAccount {
            business_id: Some(business.id),
            display_name: "Acme Admin".into(),
            email: "admin@acme.example".into(),
            password_hash: admin_password_hash,
            role: Role::Admin,
            is_admin: true,
            is_super_admin: false,
            external_subject: None,
        })
        .await?;

    let super_admin = accounts
        .create(CreateAccount {
            business_id: None,
            display_name: "Platform Operator".into(),
            email: "operator@hauldesk.example".into(),
            password_hash: super_admin_password_hash,
            role: Role::Admin,
            is_admin: true,
            is_super_admin: true,
            external_subject: None,
        })
        .await?;

    let scope = BusinessScope {
        business_id: business.id,
    };
    vehicles
        .create(
            scope,
            CreateVehicle {
                registration: "HD-101".into(),
                model: "Sprinter 316".into(),
                capacity_kg: 1500,
            },
        )
        .await?;
    vehicles
        .create(
            scope,
            CreateVehicle {
                registration: "HD-102".into(),
                model: "Transit 350".into(),
                capacity_kg: 1100,
            },
        )
        .await?;

    Ok(SeedData {
        business,
        admin,
        super_admin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hauldesk_core::repository::Pagination;

    #[tokio::test]
    async fn seed_creates_business_accounts_and_vehicles() {
        let accounts = MemAccountRepository::new();
        let businesses = MemBusinessRepository::new();
        let vehicles = MemVehicleRepository::new();

        let data = seed(
            &accounts,
            &businesses,
            &vehicles,
            "hash-a".into(),
            "hash-b".into(),
        )
        .await
        .unwrap();

        assert_eq!(data.admin.business_id, Some(data.business.id));
        assert!(data.super_admin.is_super_admin);
        assert_eq!(data.super_admin.business_id, None);

        let page = vehicles
            .list(
                BusinessScope {
                    business_id: data.business.id,
                },
                Pagination::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 2);
    }
}
