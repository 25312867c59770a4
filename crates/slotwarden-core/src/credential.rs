//! Structural credential classification.
//!
//! Credentials are identified by shape, not by where they sit in the
//! tree: any node carrying all the required fields is a credential,
//! anything else (the `settings` subtree included) is not. This
//! predicate is the single source of truth — nothing else in the
//! system special-cases key names.

use serde_json::Value;

/// Fields a node must carry to count as a credential record.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "email",
    "password",
    "expiry_date",
    "locked",
    "usage_count",
    "max_usage",
];

/// True when `node` is an object with every required credential field.
pub fn is_credential(node: &Value) -> bool {
    match node.as_object() {
        Some(map) => REQUIRED_FIELDS.iter().all(|f| map.contains_key(*f)),
        None => false,
    }
}

/// Tri-state `locked` field of a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// 0 — eligible for the lock sweep.
    Unlocked,
    /// 1 — locked by a previous sweep.
    Locked,
    /// 2 — permanently exempt; never overwritten by the sweep.
    Exempt,
}

impl LockState {
    /// Read the lock state off a credential node.
    ///
    /// Absent or null defaults to unlocked. Stores written by hand keep
    /// the value as a numeric string sometimes; both encodings are
    /// accepted. Anything unrecognized yields `None` and the caller
    /// leaves the record untouched.
    pub fn read(node: &Value) -> Option<LockState> {
        let raw = match node.get("locked") {
            None | Some(Value::Null) => return Some(LockState::Unlocked),
            Some(v) => v,
        };
        let n = match raw {
            Value::Number(n) => n.as_i64()?,
            Value::String(s) => s.trim().parse::<i64>().ok()?,
            _ => return None,
        };
        match n {
            0 => Some(LockState::Unlocked),
            1 => Some(LockState::Locked),
            2 => Some(LockState::Exempt),
            _ => None,
        }
    }
}
