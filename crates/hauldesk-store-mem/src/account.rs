//! In-memory implementation of [`AccountRepository`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use hauldesk_core::error::{HauldeskError, HauldeskResult};
use hauldesk_core::models::account::{Account, CreateAccount};
use hauldesk_core::repository::AccountRepository;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<i64, Account>,
    next_id: i64,
}

/// In-memory account repository. `Clone` hands out another handle to the
/// same underlying state.
#[derive(Clone, Default)]
pub struct MemAccountRepository {
    state: Arc<RwLock<State>>,
}

impl MemAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for MemAccountRepository {
    async fn create(&self, input: CreateAccount) -> HauldeskResult<Account> {
        let mut state = self.state.write();

        let email = input.email.to_lowercase();
        if state.accounts.values().any(|a| a.email == email) {
            return Err(HauldeskError::AlreadyExists {
                entity: "account".into(),
            });
        }

        state.next_id += 1;
        let now = Utc::now();
        let account = Account {
            id: state.next_id,
            business_id: input.business_id,
            display_name: input.display_name,
            email,
            password_hash: input.password_hash,
            role: input.role,
            is_admin: input.is_admin,
            is_super_admin: input.is_super_admin,
            blocked: false,
            external_subject: input.external_subject,
            created_at: now,
            updated_at: now,
        };
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get_by_id(&self, id: i64) -> HauldeskResult<Account> {
        self.state
            .read()
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| HauldeskError::NotFound {
                entity: "account".into(),
                id: id.to_string(),
            })
    }

    async fn get_by_email(&self, email: &str) -> HauldeskResult<Account> {
        let email = email.to_lowercase();
        self.state
            .read()
            .accounts
            .values()
            .find(|a| a.email == email)
            .cloned()
            .ok_or_else(|| HauldeskError::NotFound {
                entity: "account".into(),
                id: email,
            })
    }

    async fn get_by_external_subject(&self, subject: &str) -> HauldeskResult<Account> {
        self.state
            .read()
            .accounts
            .values()
            .find(|a| a.external_subject.as_deref() == Some(subject))
            .cloned()
            .ok_or_else(|| HauldeskError::NotFound {
                entity: "account".into(),
                id: subject.to_string(),
            })
    }

    async fn update_password(&self, id: i64, password_hash: String) -> HauldeskResult<()> {
        let mut state = self.state.write();
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| HauldeskError::NotFound {
                entity: "account".into(),
                id: id.to_string(),
            })?;
        account.password_hash = password_hash;
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn set_blocked(&self, id: i64, blocked: bool) -> HauldeskResult<()> {
        let mut state = self.state.write();
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| HauldeskError::NotFound {
                entity: "account".into(),
                id: id.to_string(),
            })?;
        account.blocked = blocked;
        account.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hauldesk_core::models::account::Role;

    fn input(email: &str) -> CreateAccount {
        CreateAccount {
            business_id: Some(1),
            display_name: "Test".into(),
            email: email.into(),
            password_hash: String::new(),
            role: Role::Dispatcher,
            is_admin: false,
            is_super_admin: false,
            external_subject: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = MemAccountRepository::new();
        let a = repo.create(input("a@example.com")).await.unwrap();
        let b = repo.create(input("b@example.com")).await.unwrap();
        assert_eq!(b.id, a.id + 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = MemAccountRepository::new();
        repo.create(input("a@example.com")).await.unwrap();
        let err = repo.create(input("A@Example.com")).await.unwrap_err();
        assert!(matches!(err, HauldeskError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn lookup_by_email_is_case_insensitive() {
        let repo = MemAccountRepository::new();
        repo.create(input("a@example.com")).await.unwrap();
        assert!(repo.get_by_email("A@EXAMPLE.COM").await.is_ok());
    }

    #[tokio::test]
    async fn set_blocked_round_trips() {
        let repo = MemAccountRepository::new();
        let a = repo.create(input("a@example.com")).await.unwrap();
        repo.set_blocked(a.id, true).await.unwrap();
        assert!(repo.get_by_id(a.id).await.unwrap().blocked);
    }

    #[tokio::test]
    async fn update_password_replaces_the_hash() {
        let repo = MemAccountRepository::new();
        let a = repo.create(input("a@example.com")).await.unwrap();
        repo.update_password(a.id, "new-hash".into()).await.unwrap();
        assert_eq!(repo.get_by_id(a.id).await.unwrap().password_hash, "new-hash");
    }

    #[tokio::test]
    async fn lookup_by_external_subject() {
        let repo = MemAccountRepository::new();
        let mut linked = input("a@example.com");
        linked.external_subject = Some("idp|a".into());
        let created = repo.create(linked).await.unwrap();

        let found = repo.get_by_external_subject("idp|a").await.unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.get_by_external_subject("idp|b").await.is_err());
    }
}
