//! HaulDesk Audit — observes every request's outcome and persists a
//! structured record without ever failing or blocking the request that
//! produced it.

pub mod derive;
pub mod filter;
pub mod recorder;
pub mod redact;

pub use derive::{derive_action, derive_entity, derive_entity_id};
pub use filter::should_record;
pub use recorder::AuditRecorder;
pub use redact::{redact_json, summarize_response, RESPONSE_CAPTURE_LIMIT};
