//! HaulDesk HTTP — the request pipeline around the access-control core.
//!
//! Three middleware layers, outermost first:
//!
//! 1. audit capture — observes every request and feeds the recorder
//! 2. authenticate — resolves the bearer credential to an [`Actor`],
//!    with one silent refresh retry
//! 3. policy — route table lookup plus role gate
//!
//! plus the minimal handler surface that exercises the core.
//!
//! [`Actor`]: hauldesk_core::models::actor::Actor

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::{default_route_table, router};
pub use state::AppState;
