//! HaulDesk in-memory store — repository implementations backed by
//! process memory.
//!
//! Stand-in for the external data-access collaborator: every repository
//! implements the corresponding `hauldesk-core` trait, and every
//! tenant-scoped query applies the [`BusinessScope`] it is handed as a
//! mandatory condition. State lives for the process lifetime only.
//!
//! [`BusinessScope`]: hauldesk_core::repository::BusinessScope

pub mod account;
pub mod audit;
pub mod business;
pub mod seed;
pub mod vehicle;

pub use account::MemAccountRepository;
pub use audit::MemAuditLogRepository;
pub use business::MemBusinessRepository;
pub use vehicle::MemVehicleRepository;
