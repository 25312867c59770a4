//! `slotwarden-engine` — the slot-shift-and-lock state machine.
//!
//! # Overview
//!
//! Three operations over a [`SlotStore`](slotwarden_store::SlotStore):
//!
//! | Operation                            | Behaviour                                              |
//! |--------------------------------------|--------------------------------------------------------|
//! | [`scheduler::shift_due_slots`]       | Advance every due slot's window, then sweep once       |
//! | [`enforcer::lock_all_pending`]       | Lock every unlocked credential in one root fetch       |
//! | [`lock_check::check_and_lock`]       | Sweep when any enabled slot is within 2 min of its end |
//!
//! Failures are isolated per slot / per credential; only an unreachable
//! store aborts an operation. All state lives in the store — two
//! overlapping invocations can race on read-then-patch, which is
//! accepted under the single-external-trigger assumption.

pub mod enforcer;
pub mod error;
pub mod lock_check;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use enforcer::lock_all_pending;
pub use error::{EngineError, Result};
pub use lock_check::check_and_lock;
pub use scheduler::{shift_due_slots, ShiftReport};
