//! The middleware chain. Layer order (outermost first): audit capture,
//! authenticate, policy.

pub mod audit;
pub mod authenticate;
pub mod policy;

pub use audit::{RequestId, capture_audit};
pub use authenticate::{NEW_ACCESS_TOKEN_HEADER, NEW_REFRESH_TOKEN_HEADER, authenticate};
pub use policy::enforce_policy;
