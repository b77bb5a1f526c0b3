//! Linear unlock math for the lock ledger.
//!
//! A holder's locked balance unlocks linearly between `lock_from` and
//! `lock_to`. Each unlock restarts the window at the current height, so the
//! remaining balance is always spread over the heights still left until
//! `lock_to`.

/// Height from which a freshly created lock record starts unlocking.
pub fn initial_unlock_height(current: u32, lock_from: u32) -> u32 {
    current.max(lock_from)
}

/// Amount of `locked` that may be released at `current`.
///
/// Returns `None` only on arithmetic overflow.
///
/// ```text
/// current ≤ lock_from  → 0
/// current ≥ lock_to    → locked
/// otherwise            → locked × (current − last_unlock) / (lock_to − last_unlock)
/// ```
pub fn unlockable(
    locked: i128,
    current: u32,
    last_unlock: u32,
    lock_from: u32,
    lock_to: u32,
) -> Option<i128> {
    if locked <= 0 || current <= lock_from {
        return Some(0);
    }
    if current >= lock_to {
        return Some(locked);
    }
    // last_unlock never exceeds the current height, but a record created
    // before lock_from still starts counting at lock_from.
    let start = last_unlock.max(lock_from);
    if current <= start {
        return Some(0);
    }
    let released = i128::from(current - start);
    let window = i128::from(lock_to - start);
    let amount = locked.checked_mul(released)?.checked_div(window)?;
    Some(amount.min(locked))
}
