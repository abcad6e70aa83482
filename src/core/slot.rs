use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A value that is either absent or fully populated, replaced wholesale.
///
/// Writers take a sequence number with [`Slot::issue`] before starting work and
/// hand it back to [`Slot::commit`]. A commit only lands if its sequence number
/// is newer than the last one committed, so a slow response issued earlier can
/// never overwrite a value from a later request.
#[derive(Debug)]
pub struct Slot<T> {
    issued: AtomicU64,
    state: RwLock<SlotState<T>>,
}

#[derive(Debug)]
struct SlotState<T> {
    value: Option<T>,
    committed: u64,
}

impl<T: Clone> Slot<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            state: RwLock::new(SlotState {
                value: None,
                committed: 0,
            }),
        }
    }

    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns whether the value was stored.
    pub fn commit(&self, seq: u64, value: T) -> bool {
        let mut state = self.write();
        if seq <= state.committed {
            return false;
        }
        state.value = Some(value);
        state.committed = seq;
        true
    }

    pub fn get(&self) -> Option<T> {
        self.read().value.clone()
    }

    pub fn issued_count(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    // A panic while holding the lock cannot leave a half-written value behind,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, SlotState<T>> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SlotState<T>> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}
