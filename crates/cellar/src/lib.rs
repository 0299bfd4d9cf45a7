//! The cellar slot-placement subsystem.
//!
//! Layers, bottom-up:
//! - [`collision`] -- advisory pre-check against the persisted assignments
//! - [`commands`] -- place / relocate / remove, each collision-checked and
//!   recorded in the rollback ledger
//! - [`undo`] -- replays ledger entries back through the forward commands
//! - [`session`] -- the session-scoped context owning ledger, ghost preview,
//!   and occupancy projection

pub mod collision;
pub mod commands;
pub mod error;
pub mod session;
pub mod undo;

pub use error::CellarError;
