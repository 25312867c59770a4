//! `slotwarden-core` — domain types shared by every slotwarden crate.
//!
//! Holds the configuration loader, the civil-timestamp utilities, the
//! slot model (window, cadence, override) and the structural credential
//! classifier. Everything here is pure: no I/O, no store access.

pub mod config;
pub mod credential;
pub mod error;
pub mod slot;
pub mod time;

pub use config::WardenConfig;
pub use credential::{is_credential, LockState};
pub use error::{Result, WardenError};
pub use slot::{Cadence, Slot, SlotPatch};
