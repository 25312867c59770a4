//! Slot scheduler: decide per slot whether a renewal is due, advance the
//! window, and record the renewal.

use chrono::{DateTime, Duration, FixedOffset};
use slotwarden_core::{
    time::{fallback_window_start, format_civil, parse_civil},
    Slot, SlotPatch,
};
use slotwarden_store::SlotStore;
use tracing::{debug, info, warn};

use crate::{enforcer::lock_all_pending, error::Result};

/// Outcome of one scheduler pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShiftReport {
    /// Identifiers of slots whose window advanced this pass.
    pub shifted: Vec<String>,
    /// Credentials locked by the post-shift sweep.
    pub locked: usize,
}

/// Evaluate every slot in the store and advance the ones that are due.
///
/// A slot is due when its `override` flag is set (a one-shot manual
/// trigger, cleared by the shift it forces) or when at least
/// `threshold_hours` have passed since `last_update`. A missing or
/// unparsable `last_update` reads as "renewed just now" — a freshly
/// created slot is never immediately due.
///
/// Individual slot failures (malformed node, bad timestamps, failed
/// patch) are logged and isolated; only an unreachable store is an
/// error. If at least one slot shifted, the lock sweep runs exactly
/// once afterwards, regardless of how many slots moved.
pub async fn shift_due_slots(
    store: &dyn SlotStore,
    now: DateTime<FixedOffset>,
) -> Result<ShiftReport> {
    let nodes = store.load_slots().await?;
    let mut report = ShiftReport::default();

    for node in nodes {
        let Some(slot) = Slot::from_value(&node.value) else {
            debug!(slot = %node.id, "not a well-formed slot, skipping");
            continue;
        };
        if !slot.enabled {
            debug!(slot = %node.id, "disabled, skipping");
            continue;
        }

        let last_update = parse_civil(&slot.last_update).unwrap_or(now);
        let elapsed = now - last_update;
        let threshold = Duration::hours(slot.cadence.threshold_hours());
        if !slot.r#override && elapsed < threshold {
            debug!(
                slot = %node.id,
                elapsed_hours = elapsed.num_hours(),
                "not due, skipping"
            );
            continue;
        }

        let patch = build_shift(&slot, now);
        info!(
            slot = %node.id,
            cadence = ?slot.cadence,
            forced = slot.r#override,
            start = %patch.slot_start,
            end = %patch.slot_end,
            "shifting slot"
        );
        match store.patch_slot(&node.path, &patch).await {
            Ok(()) => report.shifted.push(node.id),
            Err(e) => warn!(slot = %node.id, error = %e, "slot patch failed, continuing"),
        }
    }

    if !report.shifted.is_empty() {
        // Shifts are already persisted; a failed sweep must not hide them.
        match lock_all_pending(store).await {
            Ok(n) => report.locked = n,
            Err(e) => warn!(error = %e, "post-shift lock sweep failed"),
        }
    }

    Ok(report)
}

/// Compute the advanced window for a due slot.
///
/// Both edges move by one cadence-determined shift amount, preserving
/// the window length. Unparsable edges fall back to 09:00 on `now`'s
/// day (start) and one shift amount later (end), so a damaged slot
/// heals instead of aborting the pass.
fn build_shift(slot: &Slot, now: DateTime<FixedOffset>) -> SlotPatch {
    let shift = Duration::days(slot.cadence.shift_days());
    let start = parse_civil(&slot.slot_start).unwrap_or_else(|_| fallback_window_start(now));
    let end = parse_civil(&slot.slot_end).unwrap_or(start + shift);

    SlotPatch {
        slot_start: format_civil(start + shift),
        slot_end: format_civil(end + shift),
        last_update: format_civil(now),
        r#override: false,
    }
}
