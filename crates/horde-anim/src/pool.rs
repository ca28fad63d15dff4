//! One-shot audio slot pool.
//!
//! # What this models
//!
//! Hosts have a fixed bank of audio sources for one-shot clips (hit grunts,
//! attack snarls, reanimation moans).  The concurrency rules — claim a slot,
//! schedule its release at clip end, cancel that pending release if the slot
//! is re-claimed early — live here; actually producing sound is the host's
//! business.  A release timer firing for a superseded claim must not free
//! the slot, which is exactly the [`TimerSlot`] generation contract.

use horde_core::{Tick, TimerSlot};

/// Index of a claimed slot in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);

#[derive(Debug, Default)]
struct Slot {
    in_use:   bool,
    priority: u8,
    release:  TimerSlot,
}

/// Fixed-size bank of one-shot slots with priority eviction.
#[derive(Debug)]
pub struct OneShotPool {
    slots: Vec<Slot>,
}

impl OneShotPool {
    pub fn new(capacity: usize) -> OneShotPool {
        OneShotPool {
            slots: (0..capacity).map(|_| Slot::default()).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn in_use(&self) -> usize {
        self.slots.iter().filter(|s| s.in_use).count()
    }

    pub fn is_playing(&self, id: SlotId) -> bool {
        self.slots.get(id.0).is_some_and(|s| s.in_use)
    }

    /// Claim a slot for a clip of `duration_ticks`, releasing it
    /// automatically once the clip ends.
    ///
    /// A free slot is preferred; otherwise the busy slot with the lowest
    /// priority is evicted, but only if that priority is strictly below the
    /// new clip's.  Returns `None` when every slot is busy with
    /// equal-or-higher-priority clips.
    pub fn play(&mut self, priority: u8, duration_ticks: u64, now: Tick) -> Option<SlotId> {
        let index = match self.slots.iter().position(|s| !s.in_use) {
            Some(free) => free,
            None => {
                let (weakest, slot) = self
                    .slots
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, s)| s.priority)?;
                if slot.priority >= priority {
                    return None;
                }
                weakest
            }
        };

        let slot = &mut self.slots[index];
        slot.in_use = true;
        slot.priority = priority;
        // Re-claiming cancels the previous clip's pending release, so the
        // old deadline cannot free the new clip early.
        slot.release.schedule(now, duration_ticks);
        Some(SlotId(index))
    }

    /// Free a slot before its clip ends.
    pub fn stop(&mut self, id: SlotId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.in_use = false;
            slot.priority = 0;
            slot.release.cancel();
        }
    }

    /// Fire due release timers.  Call once per tick.
    pub fn tick(&mut self, now: Tick) {
        for slot in &mut self.slots {
            if slot.in_use && slot.release.fire(now) {
                slot.in_use = false;
                slot.priority = 0;
            }
        }
    }
}
