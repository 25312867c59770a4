//! Lock-check evaluator: the minute-cadence external trigger.

use chrono::{DateTime, Duration, FixedOffset};
use slotwarden_core::{time::parse_civil, Slot};
use slotwarden_store::SlotStore;
use tracing::{debug, info};

use crate::{enforcer::lock_all_pending, error::Result};

/// How close to a slot's end the sweep fires.
const LOCK_MARGIN_MINUTES: i64 = 2;

/// Run the lock sweep when any enabled slot is within two minutes of
/// its end.
///
/// The trigger is deliberately coarse and global: credentials are not
/// mapped to the slot that governs them, so one slot crossing its
/// margin sweeps the whole tree, at most once per invocation. Slots
/// with a missing or unparsable `slot_end` are skipped.
///
/// Returns the number of credentials locked (0 when no slot is within
/// the margin).
pub async fn check_and_lock(store: &dyn SlotStore, now: DateTime<FixedOffset>) -> Result<usize> {
    let nodes = store.load_slots().await?;
    let margin = Duration::minutes(LOCK_MARGIN_MINUTES);

    let imminent = nodes.iter().find_map(|node| {
        let slot = Slot::from_value(&node.value)?;
        if !slot.enabled {
            return None;
        }
        let end = parse_civil(&slot.slot_end).ok()?;
        (now >= end - margin).then(|| node.id.clone())
    });

    match imminent {
        Some(id) => {
            info!(slot = %id, "slot end imminent, running lock sweep");
            lock_all_pending(store).await
        }
        None => {
            debug!("no enabled slot within the lock margin");
            Ok(0)
        }
    }
}
