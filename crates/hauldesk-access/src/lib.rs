//! HaulDesk Access — the tenant-isolation and role/authorization layer.
//!
//! Three pieces, consumed by the HTTP middleware chain and by data
//! components:
//!
//! - [`TenantAccessGuard`] decides whether an actor may touch a target
//!   business and produces the [`BusinessScope`] every scoped query must
//!   apply.
//! - [`RoleGate`] checks an actor against a per-route role allow-list.
//! - [`RouteTable`] is the static table of per-route policies (public
//!   flag, credential scheme, allowed roles) — explicit configuration,
//!   no runtime reflection.
//!
//! [`BusinessScope`]: hauldesk_core::repository::BusinessScope

pub mod guard;
pub mod role;
pub mod routes;

pub use guard::TenantAccessGuard;
pub use role::RoleGate;
pub use routes::{RoutePolicy, RouteTable};
