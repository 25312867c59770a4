//! `slotwarden-store` — access to the remote JSON document store.
//!
//! The store is a Firebase-REST-style tree: GET/PATCH/PUT against
//! `{base_url}/{path}.json`, no transactions across keys. [`RestStore`]
//! is the real transport; the engine is written against the
//! [`SlotStore`] trait so tests can substitute an in-memory tree.

pub mod error;
pub mod rest;

use async_trait::async_trait;
use serde_json::Value;
use slotwarden_core::SlotPatch;

pub use error::{Result, StoreError};
pub use rest::RestStore;

/// Reserved id and path for the legacy single-slot storage shape.
pub const LEGACY_SLOT_ID: &str = "slot";
pub const LEGACY_SLOT_PATH: &str = "settings";

/// A slot definition as found in the store, before validation.
#[derive(Debug, Clone)]
pub struct SlotNode {
    /// Slot identifier; the legacy single-slot shape uses [`LEGACY_SLOT_ID`].
    pub id: String,
    /// Store path the slot is patched at.
    pub path: String,
    /// Raw JSON node — whether it is a well-formed slot is the engine's call.
    pub value: Value,
}

/// Everything the scheduling and locking engine needs from the store.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// All slot definitions, both storage shapes unified into one list:
    /// the `settings/slots/{id}` mapping when present, otherwise the
    /// legacy single slot stored directly on `settings` (as a one-entry
    /// list). An empty store yields an empty list, not an error.
    async fn load_slots(&self) -> Result<Vec<SlotNode>>;

    /// Patch the shifted fields of one slot at its path.
    async fn patch_slot(&self, path: &str, patch: &SlotPatch) -> Result<()>;

    /// The entire tree root. `None` when the store is empty.
    async fn fetch_root(&self) -> Result<Option<Value>>;

    /// Patch a single credential's `locked` field to 1.
    async fn lock_credential(&self, key: &str) -> Result<()>;

    /// Overwrite the entire tree root.
    async fn put_root(&self, data: &Value) -> Result<()>;
}
