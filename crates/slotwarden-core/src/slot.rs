use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Renewal cadence of a slot: how long must pass since the last renewal
/// before a shift is due, and how far each shift moves the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    #[default]
    Daily,
    Weekly,
}

impl Cadence {
    /// Hours that must elapse since `last_update` before a shift is due.
    pub fn threshold_hours(self) -> i64 {
        match self {
            Cadence::Daily => 24,
            Cadence::Weekly => 168,
        }
    }

    /// Days both window edges advance on a shift.
    pub fn shift_days(self) -> i64 {
        match self {
            Cadence::Daily => 1,
            Cadence::Weekly => 7,
        }
    }
}

/// Stored slots only ever distinguish "weekly"; every other value
/// (missing, "daily", legacy typos) means daily.
fn lenient_cadence<'de, D>(deserializer: D) -> Result<Cadence, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("weekly") => Cadence::Weekly,
        _ => Cadence::Daily,
    })
}

/// A recurring access window as stored in the database.
///
/// Timestamps stay as raw strings here; whether they parse — and what to
/// do when they don't — is the scheduler's call, per slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Slot {
    /// Dormant slots are never evaluated.
    pub enabled: bool,
    pub slot_start: String,
    pub slot_end: String,
    /// Cadence clock: civil timestamp of the most recent renewal.
    pub last_update: String,
    /// Storage variants disagree on the field name; all mean cadence.
    #[serde(
        alias = "period",
        alias = "type",
        alias = "frequency",
        deserialize_with = "lenient_cadence"
    )]
    pub cadence: Cadence,
    /// One-shot manual "shift now" flag; cleared by the shift it forces.
    pub r#override: bool,
}

impl Slot {
    /// Interpret a raw store node as a slot. Non-objects and objects with
    /// mistyped fields are not well-formed slots.
    pub fn from_value(value: &Value) -> Option<Slot> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

/// The fields a shift writes back. Patched — not put — so sibling keys
/// on the slot node survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotPatch {
    pub slot_start: String,
    pub slot_end: String,
    pub last_update: String,
    pub r#override: bool,
}
