//! Credential verification — the single entry point both schemes share.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use hauldesk_core::error::{HauldeskError, HauldeskResult};
use hauldesk_core::models::account::Account;
use hauldesk_core::models::actor::Actor;
use hauldesk_core::repository::{AccountRepository, BusinessRepository};

use crate::config::AuthConfig;
use crate::credential::Credential;
use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::token;

/// Shared post-lookup checks: the account must not be blocked and its
/// owning business (if any) must exist and be active. Both credential
/// schemes go through here, so the checks cannot drift apart.
pub(crate) async fn ensure_account_usable<B: BusinessRepository>(
    businesses: &B,
    account: &Account,
) -> HauldeskResult<()> {
    if account.blocked {
        return Err(AuthError::AccountBlocked.into());
    }
    if let Some(business_id) = account.business_id {
        let business = match businesses.get_by_id(business_id).await {
            Ok(b) => b,
            Err(HauldeskError::NotFound { .. }) => {
                return Err(AuthError::BusinessInactive.into());
            }
            Err(e) => return Err(e),
        };
        if !business.active {
            return Err(AuthError::BusinessInactive.into());
        }
    }
    Ok(())
}

/// Validates a bearer credential and resolves it to a fresh [`Actor`].
///
/// Pure lookup: it never mutates the token lifecycle store.
pub struct CredentialVerifier<A: AccountRepository, B: BusinessRepository> {
    accounts: A,
    businesses: B,
    provider: Arc<dyn IdentityProvider>,
    config: AuthConfig,
}

impl<A: AccountRepository, B: BusinessRepository> CredentialVerifier<A, B> {
    pub fn new(
        accounts: A,
        businesses: B,
        provider: Arc<dyn IdentityProvider>,
        config: AuthConfig,
    ) -> Self {
        Self {
            accounts,
            businesses,
            provider,
            config,
        }
    }

    /// Verify a credential and produce the request actor, or fail with
    /// an authentication error (invalid/expired credential, blocked
    /// account, inactive business).
    pub async fn verify(&self, credential: &Credential) -> HauldeskResult<Actor> {
        let (account, issued_at, expires_at) = match credential {
            Credential::SelfIssued(raw) => {
                // 1. Cryptographic verification of signature and expiry.
                let claims = token::decode_access_token(raw, &self.config)?;
                let account_id = claims.account_id()?;

                // 2. The embedded id must resolve to a live account.
                let account = match self.accounts.get_by_id(account_id).await {
                    Ok(a) => a,
                    Err(HauldeskError::NotFound { .. }) => {
                        return Err(AuthError::InvalidCredentials.into());
                    }
                    Err(e) => return Err(e),
                };

                let issued_at = timestamp(claims.iat);
                let expires_at = timestamp(claims.exp);
                (account, issued_at, expires_at)
            }
            Credential::ExternalIdentity(raw) => {
                // 1. The provider owns signature/expiry validation and
                //    hands back a stable subject id.
                let subject = self.provider.resolve_subject(raw).await?;

                // 2. The subject must be linked to a local account.
                let account = match self.accounts.get_by_external_subject(&subject).await {
                    Ok(a) => a,
                    Err(HauldeskError::NotFound { .. }) => {
                        return Err(AuthError::InvalidCredentials.into());
                    }
                    Err(e) => return Err(e),
                };

                // Provider tokens carry their own validity window; the
                // actor's window is advisory here.
                let now = Utc::now();
                let expires_at =
                    now + chrono::Duration::seconds(self.config.access_token_lifetime_secs as i64);
                (account, now, expires_at)
            }
        };

        // 3. Checks shared by both schemes.
        ensure_account_usable(&self.businesses, &account).await?;

        Ok(Actor::from_account(&account, issued_at, expires_at))
    }
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now)
}
