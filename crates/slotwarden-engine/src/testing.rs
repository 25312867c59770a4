//! In-memory [`SlotStore`] used by the engine tests: a JSON tree behind
//! a mutex with the same path conventions as the real store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use slotwarden_core::SlotPatch;
use slotwarden_store::{
    Result, SlotNode, SlotStore, StoreError, LEGACY_SLOT_ID, LEGACY_SLOT_PATH,
};

/// A minimal well-formed credential record.
pub fn credential(locked: i64) -> Value {
    json!({
        "email": "user@example.com",
        "password": "hunter2",
        "expiry_date": "2025-06-01 09:00:00",
        "locked": locked,
        "usage_count": 0,
        "max_usage": 5,
    })
}

pub struct MemoryStore {
    tree: Mutex<Value>,
    root_fetches: AtomicUsize,
    failing_locks: HashSet<String>,
}

impl MemoryStore {
    pub fn new(tree: Value) -> Self {
        Self {
            tree: Mutex::new(tree),
            root_fetches: AtomicUsize::new(0),
            failing_locks: HashSet::new(),
        }
    }

    /// Make `lock_credential` fail for one key, to exercise sweep isolation.
    pub fn failing_lock_on(mut self, key: &str) -> Self {
        self.failing_locks.insert(key.to_string());
        self
    }

    pub fn tree(&self) -> Value {
        self.tree.lock().unwrap().clone()
    }

    /// Node at a slash-separated path, if present.
    pub fn get(&self, path: &str) -> Option<Value> {
        let tree = self.tree.lock().unwrap();
        path.split('/')
            .try_fold(&*tree, |node, seg| node.get(seg))
            .cloned()
    }

    /// How many times the whole tree was fetched — one per sweep.
    pub fn root_fetches(&self) -> usize {
        self.root_fetches.load(Ordering::SeqCst)
    }

    fn merge_at(&self, path: &str, fields: Value) {
        let mut tree = self.tree.lock().unwrap();
        let mut node = &mut *tree;
        for seg in path.split('/') {
            if !node.is_object() {
                *node = json!({});
            }
            node = node
                .as_object_mut()
                .unwrap()
                .entry(seg.to_string())
                .or_insert(json!({}));
        }
        if !node.is_object() {
            *node = json!({});
        }
        if let (Some(target), Some(updates)) = (node.as_object_mut(), fields.as_object()) {
            for (k, v) in updates {
                target.insert(k.clone(), v.clone());
            }
        }
    }
}

fn looks_like_slot(node: &Value) -> bool {
    ["slot_start", "slot_end", "last_update", "enabled"]
        .iter()
        .any(|k| node.get(*k).is_some())
}

#[async_trait]
impl SlotStore for MemoryStore {
    async fn load_slots(&self) -> Result<Vec<SlotNode>> {
        let tree = self.tree.lock().unwrap().clone();

        if let Some(Value::Object(map)) = tree.pointer("/settings/slots").cloned() {
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

        match tree.get("settings") {
            Some(value) if looks_like_slot(value) => Ok(vec![SlotNode {
                id: LEGACY_SLOT_ID.to_string(),
                path: LEGACY_SLOT_PATH.to_string(),
                value: value.clone(),
            }]),
            _ => Ok(Vec::new()),
        }
    }

    async fn patch_slot(&self, path: &str, patch: &SlotPatch) -> Result<()> {
        self.merge_at(path, serde_json::to_value(patch)?);
        Ok(())
    }

    async fn fetch_root(&self) -> Result<Option<Value>> {
        self.root_fetches.fetch_add(1, Ordering::SeqCst);
        let tree = self.tree.lock().unwrap().clone();
        Ok(if tree.is_null() { None } else { Some(tree) })
    }

    async fn lock_credential(&self, key: &str) -> Result<()> {
        if self.failing_locks.contains(key) {
            return Err(StoreError::Status {
                status: 500,
                path: key.to_string(),
            });
        }
        self.merge_at(key, json!({ "locked": 1 }));
        Ok(())
    }

    async fn put_root(&self, data: &Value) -> Result<()> {
        *self.tree.lock().unwrap() = data.clone();
        Ok(())
    }
}
