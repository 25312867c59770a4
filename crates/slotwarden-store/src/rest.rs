use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use slotwarden_core::{config::StoreConfig, SlotPatch};
use tracing::debug;

use crate::{
    error::{Result, StoreError},
    SlotNode, SlotStore, LEGACY_SLOT_ID, LEGACY_SLOT_PATH,
};

/// Firebase-REST-style client: every path maps to `{base}/{path}.json`.
///
/// Requests carry a bounded timeout and are never retried — a retried
/// PATCH could double-apply a slot shift.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    pub fn new(cfg: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/.json", self.base_url)
        } else {
            format!("{}/{}.json", self.base_url, path)
        }
    }

    /// GET a path. The store answers `null` for absent nodes; that maps
    /// to `None` rather than an error.
    async fn get_json(&self, path: &str) -> Result<Option<Value>> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        let value: Value = resp.json().await?;
        debug!(path, absent = value.is_null(), "store get");
        Ok(if value.is_null() { None } else { Some(value) })
    }

    async fn patch_json(&self, path: &str, body: &Value) -> Result<()> {
        let resp = self.client.patch(self.url(path)).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        debug!(path, "store patch");
        Ok(())
    }
}

/// The legacy `settings` node is treated as a slot only when it carries
/// at least one slot field; a settings tree that merely holds the
/// `slots` mapping (or unrelated keys) is not a slot itself.
fn looks_like_slot(node: &Value) -> bool {
    ["slot_start", "slot_end", "last_update", "enabled"]
        .iter()
        .any(|k| node.get(*k).is_some())
}

#[async_trait]
impl SlotStore for RestStore {
    async fn load_slots(&self) -> Result<Vec<SlotNode>> {
        // Preferred shape: a mapping under settings/slots.
        if let Some(Value::Object(map)) = self.get_json("settings/slots").await? {
            if !map.is_empty() {
                return Ok(map
                    .into_iter()
                    .map(|(id, value)| SlotNode {
                        path: format!("settings/slots/{id}"),
                        id,
                        value,
                    })
                    .collect());
            }
        }

        // Legacy shape: slot fields directly on settings.
        match self.get_json(LEGACY_SLOT_PATH).await? {
            Some(value) if looks_like_slot(&value) => Ok(vec![SlotNode {
                id: LEGACY_SLOT_ID.to_string(),
                path: LEGACY_SLOT_PATH.to_string(),
                value,
            }]),
            _ => Ok(Vec::new()),
        }
    }

    async fn patch_slot(&self, path: &str, patch: &SlotPatch) -> Result<()> {
        // SlotPatch serializes to a plain object of the four shifted fields.
        let body = serde_json::to_value(patch)?;
        self.patch_json(path, &body).await
    }

    async fn fetch_root(&self) -> Result<Option<Value>> {
        self.get_json("").await
    }

    async fn lock_credential(&self, key: &str) -> Result<()> {
        self.patch_json(key, &json!({ "locked": 1 })).await
    }

    async fn put_root(&self, data: &Value) -> Result<()> {
        let resp = self.client.put(self.url("")).json(data).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                path: String::new(),
            });
        }
        Ok(())
    }
}
