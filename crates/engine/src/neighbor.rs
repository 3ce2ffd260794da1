use crate::addr::Address;

/// Fixed capacity of the neighbor table.
pub const TABLE_LEN: usize = 32;

/// Eviction threshold: once `recorded` reaches this value the slot is
/// cleared before the next aging window.
pub const MAX_RECORDED: i8 = 6;

/// A single neighbor entry: an address plus two freshness counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub addr: Address,
    pub arrived: bool,
    pub recorded: i8,
}

/// The fixed-capacity slot array governing which peers are currently
/// considered reachable.
///
/// Every mutation here is expected to run under the engine's table lock;
/// this type itself performs no locking.
pub struct Table {
    slots: [Option<Neighbor>; TABLE_LEN],
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            slots: [None; TABLE_LEN],
        }
    }

    /// Iterates over occupied slots in table order. Slot order carries no
    /// meaning and must not be relied on across updates.
    pub fn occupied(&self) -> impl Iterator<Item = &Neighbor> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn len(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the occupied slot for `addr`, if any.
    pub fn get(&self, addr: Address) -> Option<&Neighbor> {
        self.occupied().find(|n| n.addr == addr)
    }

    pub fn clear(&mut self) {
        self.slots = [None; TABLE_LEN];
    }

    /// Ingests an observed beacon source address.
    ///
    /// If a slot for this address already exists, it is marked arrived
    /// without touching `recorded`. Otherwise the lowest-indexed empty slot
    /// is claimed with a fresh record (`recorded = -1`). If the table is
    /// full, the observation is dropped silently.
    pub fn record_arrival(&mut self, addr: Address) {
        let mut free_index = None;

        for (index, slot) in self.slots.iter_mut().enumerate() {
            match slot {
                Some(neighbor) if neighbor.addr == addr => {
                    neighbor.arrived = true;
                    return;
                }
                None if free_index.is_none() => free_index = Some(index),
                _ => {}
            }
        }

        if let Some(index) = free_index {
            self.slots[index] = Some(Neighbor {
                addr,
                arrived: true,
                recorded: -1,
            });
        }
    }

    /// Runs one aging pass over every occupied slot.
    ///
    /// A slot that did not see a beacon since the last pass has its
    /// `recorded` counter incremented and is evicted once that counter
    /// reaches [`MAX_RECORDED`]. A slot that did see a beacon is reset to
    /// the just-seen state.
    pub fn age(&mut self) {
        for slot in self.slots.iter_mut() {
            let Some(neighbor) = slot else { continue };

            if neighbor.arrived {
                neighbor.arrived = false;
                neighbor.recorded = 0;
            } else {
                neighbor.recorded += 1;
                if neighbor.recorded >= MAX_RECORDED {
                    *slot = None;
                }
            }
        }
    }
}
