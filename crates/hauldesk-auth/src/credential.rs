//! Bearer credential variants.
//!
//! The system is migrating from self-issued signed tokens to a managed
//! identity provider; both schemes coexist behind one verification entry
//! point so the blocked/inactive checks are never duplicated.

use serde::{Deserialize, Serialize};

/// Which credential scheme an endpoint accepts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// Self-issued signed token, verified locally.
    SelfIssued,
    /// Third-party identity-provider token, resolved remotely.
    ExternalIdentity,
}

/// A bearer credential tagged with its scheme.
#[derive(Debug, Clone)]
pub enum Credential {
    SelfIssued(String),
    ExternalIdentity(String),
}

impl Credential {
    /// Wrap a raw bearer token under the given scheme.
    pub fn for_scheme(scheme: AuthScheme, token: String) -> Self {
        match scheme {
            AuthScheme::SelfIssued => Credential::SelfIssued(token),
            AuthScheme::ExternalIdentity => Credential::ExternalIdentity(token),
        }
    }
}
