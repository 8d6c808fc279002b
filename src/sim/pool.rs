//! Fixed-capacity slot arena for pursuers
//!
//! Slots are opaque indices. A slot is either free (on the free list) or
//! active (bound to exactly one pursuer). The pool never grows.

use serde::{Deserialize, Serialize};

/// Opaque pool slot index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotHandle(u32);

impl SlotHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct EntityPool {
    active: Vec<bool>,
    free: Vec<SlotHandle>,
}

impl EntityPool {
    /// Capacities beyond the handle range are capped at `u32::MAX` slots
    pub fn new(capacity: usize) -> Self {
        let slots = u32::try_from(capacity).unwrap_or_else(|_| {
            log::warn!("Pool capacity {} exceeds handle range, capping", capacity);
            u32::MAX
        });
        // Reverse so the lowest index is handed out first
        let free: Vec<SlotHandle> = (0..slots).rev().map(SlotHandle).collect();
        Self {
            active: vec![false; free.len()],
            free,
        }
    }

    /// Take a free slot, or None when the pool is exhausted
    pub fn acquire(&mut self) -> Option<SlotHandle> {
        let slot = self.free.pop()?;
        self.active[slot.index()] = true;
        Some(slot)
    }

    /// Return a slot to the free list.
    ///
    /// Releasing a slot that is not active is a caller bug. Debug builds
    /// panic; release builds log and ignore it so the free/active counts stay
    /// consistent.
    pub fn release(&mut self, slot: SlotHandle) {
        let Some(active) = self.active.get_mut(slot.index()) else {
            debug_assert!(false, "release of out-of-range slot {:?}", slot);
            log::warn!("Ignoring release of out-of-range slot {}", slot.0);
            return;
        };
        if !*active {
            debug_assert!(false, "double release of slot {:?}", slot);
            log::warn!("Ignoring double release of slot {}", slot.0);
            return;
        }
        *active = false;
        self.free.push(slot);
    }

    pub fn is_active(&self, slot: SlotHandle) -> bool {
        self.active.get(slot.index()).copied().unwrap_or(false)
    }

    pub fn capacity(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }
}
