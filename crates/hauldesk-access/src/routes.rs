//! Static route policy table.
//!
//! Per-route authentication and authorization configuration lives here
//! as plain data consumed by one middleware chain, instead of being
//! scattered across handlers.

use hauldesk_auth::credential::AuthScheme;
use hauldesk_core::models::account::Role;

/// Policy for one route.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    /// HTTP method, uppercase.
    pub method: &'static str,
    /// Path pattern; `{param}` segments match any single segment.
    pub pattern: &'static str,
    /// Public routes skip authentication entirely.
    pub public: bool,
    /// Which credential scheme the route accepts.
    pub scheme: AuthScheme,
    /// Role allow-list. Empty means any authenticated actor; routes opt
    /// into restriction by naming roles.
    pub allowed_roles: Vec<Role>,
}

impl RoutePolicy {
    /// A route any caller may hit without credentials.
    pub fn public(method: &'static str, pattern: &'static str) -> Self {
        Self {
            method,
            pattern,
            public: true,
            scheme: AuthScheme::SelfIssued,
            allowed_roles: Vec::new(),
        }
    }

    /// A route open to any authenticated actor.
    pub fn authenticated(method: &'static str, pattern: &'static str) -> Self {
        Self {
            method,
            pattern,
            public: false,
            scheme: AuthScheme::SelfIssued,
            allowed_roles: Vec::new(),
        }
    }

    /// Restrict to the given roles (admins always pass).
    pub fn with_roles(mut self, roles: &[Role]) -> Self {
        self.allowed_roles = roles.to_vec();
        self
    }

    /// Accept the external-identity scheme instead of self-issued
    /// tokens.
    pub fn with_scheme(mut self, scheme: AuthScheme) -> Self {
        self.scheme = scheme;
        self
    }

    fn matches(&self, method: &str, path: &str) -> bool {
        if self.method != method {
            return false;
        }
        let pattern: Vec<&str> = self.pattern.split('/').filter(|s| !s.is_empty()).collect();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if pattern.len() != segments.len() {
            return false;
        }
        pattern
            .iter()
            .zip(&segments)
            .all(|(p, s)| p.starts_with('{') || p == s)
    }
}

/// The static table consulted once per request.
///
/// First match wins, so list specific patterns before wildcard ones. A
/// request matching no entry falls back to "authenticated, any role,
/// self-issued scheme" — unknown paths are never silently public.
pub struct RouteTable {
    routes: Vec<RoutePolicy>,
    fallback: RoutePolicy,
}

impl RouteTable {
    pub fn new(routes: Vec<RoutePolicy>) -> Self {
        Self {
            routes,
            fallback: RoutePolicy::authenticated("", ""),
        }
    }

    /// The policy governing `method` + `path`.
    pub fn policy_for(&self, method: &str, path: &str) -> &RoutePolicy {
        self.routes
            .iter()
            .find(|r| r.matches(method, path))
            .unwrap_or(&self.fallback)
    }
}
