//! Pure domain logic for the Vinoteca wine-inventory tracker.
//!
//! This crate has **zero database dependencies**. It holds the slot key
//! model, the occupancy projection, the ghost-preview state machine, the
//! rollback ledger, and the enrichment merge logic. Persistence lives in
//! `vinoteca-db`; orchestration over both lives in `vinoteca-cellar`.

pub mod enrichment;
pub mod error;
pub mod ghost;
pub mod ledger;
pub mod occupancy;
pub mod slot;
pub mod types;
