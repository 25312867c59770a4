//! Lock enforcer: the "sweep and lock what's unlocked" primitive.

use slotwarden_core::{is_credential, LockState};
use slotwarden_store::SlotStore;
use tracing::{info, warn};

use crate::error::Result;

/// Sweep the whole credential tree and lock every unlocked credential.
///
/// One root fetch per sweep. Records the classifier does not recognize
/// as credentials are skipped; `locked == 2` is a permanent exemption
/// and is never overwritten. Per-record patch failures are logged and
/// skipped — the returned count reflects confirmed transitions only.
///
/// No precondition on slot state: both the scheduler's post-shift hook
/// and the standalone lock-check flow call this as-is.
pub async fn lock_all_pending(store: &dyn SlotStore) -> Result<usize> {
    let Some(root) = store.fetch_root().await? else {
        info!("credential tree is empty, nothing to lock");
        return Ok(0);
    };
    let Some(entries) = root.as_object() else {
        warn!("store root is not an object, nothing to lock");
        return Ok(0);
    };

    let mut locked = 0usize;
    for (key, node) in entries {
        if !is_credential(node) {
            continue;
        }
        match LockState::read(node) {
            Some(LockState::Unlocked) => match store.lock_credential(key).await {
                Ok(()) => {
                    info!(credential = %key, "locked");
                    locked += 1;
                }
                Err(e) => {
                    warn!(credential = %key, error = %e, "lock patch failed, continuing");
                }
            },
            Some(LockState::Locked) | Some(LockState::Exempt) => {}
            None => warn!(credential = %key, "unrecognized locked value, leaving untouched"),
        }
    }

    info!(count = locked, "lock sweep complete");
    Ok(locked)
}
