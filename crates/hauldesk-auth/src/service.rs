//! Authentication service — sign-up, sign-in, refresh, and sign-out
//! orchestration.

use std::sync::Arc;

use chrono::{Duration, Utc};
use hauldesk_core::error::{HauldeskError, HauldeskResult};
use hauldesk_core::models::account::{CreateAccount, Role};
use hauldesk_core::repository::{AccountRepository, BusinessRepository};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::store::{CredentialPair, TokenStore};
use crate::token;
use crate::verifier::ensure_account_usable;

/// Input for the sign-up flow.
#[derive(Debug)]
pub struct SignUpInput {
    pub business_id: Option<i64>,
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Input for the sign-in flow.
#[derive(Debug)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// A freshly issued credential pair, returned to the client.
#[derive(Debug)]
pub struct AuthOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Raw opaque refresh token (returned to the client, held in the
    /// lifecycle store until rotated or revoked).
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// The authenticated account's id.
    pub account_id: i64,
}

/// Authentication service.
///
/// Generic over repository implementations so the auth layer has no
/// dependency on any particular store. Holds the process-wide token
/// lifecycle store; pairs it issues live there until rotated, revoked,
/// or swept.
pub struct AuthService<A: AccountRepository, B: BusinessRepository> {
    accounts: A,
    businesses: B,
    tokens: Arc<dyn TokenStore>,
    config: AuthConfig,
}

impl<A: AccountRepository, B: BusinessRepository> AuthService<A, B> {
    pub fn new(accounts: A, businesses: B, tokens: Arc<dyn TokenStore>, config: AuthConfig) -> Self {
        Self {
            accounts,
            businesses,
            tokens,
            config,
        }
    }

    /// Issue a pair for an account and register it in the lifecycle
    /// store, superseding any pair the account already holds.
    fn issue_pair(&self, account_id: i64, business_id: Option<i64>) -> HauldeskResult<AuthOutput> {
        let access_token = token::issue_access_token(account_id, business_id, &self.config)?;
        let refresh_token = token::generate_refresh_token();
        let expires_at =
            Utc::now() + Duration::seconds(self.config.refresh_token_lifetime_secs as i64);

        self.tokens.store(CredentialPair {
            access: access_token.clone(),
            refresh: refresh_token.clone(),
            account_id,
            expires_at,
        });

        Ok(AuthOutput {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_lifetime_secs,
            account_id,
        })
    }

    /// Create an account and sign it in.
    pub async fn sign_up(&self, input: SignUpInput) -> HauldeskResult<AuthOutput> {
        // 1. Password policy.
        if input.password.len() < self.config.min_password_length {
            return Err(AuthError::WeakPassword {
                min: self.config.min_password_length,
            }
            .into());
        }

        // 2. The owning business, when given, must exist and be active
        //    before the account is created under it.
        if let Some(business_id) = input.business_id {
            let business = match self.businesses.get_by_id(business_id).await {
                Ok(b) => b,
                Err(HauldeskError::NotFound { .. }) => {
                    return Err(HauldeskError::BusinessNotFound { id: business_id });
                }
                Err(e) => return Err(e),
            };
            if !business.active {
                return Err(HauldeskError::BusinessInactive { id: business_id });
            }
        }

        // 3. Hash and create. New sign-ups never carry admin flags.
        let password_hash =
            password::hash_password(&input.password, self.config.pepper.as_deref())?;
        let account = self
            .accounts
            .create(CreateAccount {
                business_id: input.business_id,
                display_name: input.display_name,
                email: input.email,
                password_hash,
                role: input.role,
                is_admin: false,
                is_super_admin: false,
                external_subject: None,
            })
            .await?;

        // 4. Issue the first pair.
        self.issue_pair(account.id, account.business_id)
    }

    /// Authenticate with email + password and issue a credential pair.
    pub async fn sign_in(&self, input: SignInInput) -> HauldeskResult<AuthOutput> {
        // 1. Look up the account. A missing account reads the same as a
        //    wrong password.
        let account = match self.accounts.get_by_email(&input.email).await {
            Ok(a) => a,
            Err(HauldeskError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify password.
        let valid = password::verify_password(
            &input.password,
            &account.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Blocked / inactive-business checks.
        ensure_account_usable(&self.businesses, &account).await?;

        // 4. Issue the pair.
        self.issue_pair(account.id, account.business_id)
    }

    /// Rotate the pair stored under `old_access`: verify the presented
    /// refresh credential, re-check the account, and issue a new pair.
    ///
    /// Each refresh credential is single-use. Any failure invalidates
    /// every pair the account holds, forcing a fresh sign-in.
    pub async fn refresh(
        &self,
        old_access: &str,
        raw_refresh: &str,
    ) -> HauldeskResult<AuthOutput> {
        // 1. The pair must still be live in the store.
        let Some(pair) = self.tokens.get(old_access) else {
            return Err(AuthError::RefreshFailed.into());
        };

        // 2. The presented refresh credential must be the paired one.
        if pair.refresh != raw_refresh {
            tracing::warn!(
                account_id = pair.account_id,
                "refresh credential mismatch; invalidating stored pairs"
            );
            self.tokens.remove_all_for_account(pair.account_id);
            return Err(AuthError::RefreshFailed.into());
        }

        // 3. The account must still be usable.
        let account = match self.accounts.get_by_id(pair.account_id).await {
            Ok(a) => a,
            Err(HauldeskError::NotFound { .. }) => {
                self.tokens.remove_all_for_account(pair.account_id);
                return Err(AuthError::RefreshFailed.into());
            }
            Err(e) => return Err(e),
        };
        if let Err(e) = ensure_account_usable(&self.businesses, &account).await {
            tracing::debug!(account_id = account.id, "refresh rejected: account unusable");
            self.tokens.remove_all_for_account(pair.account_id);
            return Err(e);
        }

        // 4. Issue the replacement and rotate atomically.
        let access_token = token::issue_access_token(account.id, account.business_id, &self.config)?;
        let refresh_token = token::generate_refresh_token();
        let expires_at =
            Utc::now() + Duration::seconds(self.config.refresh_token_lifetime_secs as i64);

        if self
            .tokens
            .rotate(
                old_access,
                access_token.clone(),
                refresh_token.clone(),
                expires_at,
            )
            .is_none()
        {
            // The pair vanished between the lookup and the rotation
            // (concurrent logout or sweep).
            return Err(AuthError::RefreshFailed.into());
        }

        Ok(AuthOutput {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_lifetime_secs,
            account_id: account.id,
        })
    }

    /// Drop the pair stored under an access credential (logout).
    pub fn sign_out(&self, access: &str) {
        self.tokens.remove(access);
    }

    /// Drop every pair an account holds (password change, forced
    /// re-login).
    pub fn revoke_all(&self, account_id: i64) {
        self.tokens.remove_all_for_account(account_id);
    }
}
