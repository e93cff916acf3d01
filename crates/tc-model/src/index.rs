//! Global node index.
//!
//! Maps archive-wide global node ids onto (region, local id) pairs. Storage is
//! a dense arena addressed by the global id and sized to max(global id) + 1;
//! slots nobody claimed hold `None`.

use tc_core::{GlobalId, LocalId, RegionId};

/// Where a global node lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLocation {
    pub region: RegionId,
    pub local: LocalId,
}

#[derive(Debug, Clone, Default)]
pub struct GlobalIdIndex {
    slots: Vec<Option<NodeLocation>>,
    mapped: usize,
}

impl GlobalIdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `global` for `location`, growing storage as needed.
    ///
    /// Returns the previous owner if the slot was already taken; the index is
    /// left unchanged in that case.
    pub(crate) fn insert(
        &mut self,
        global: GlobalId,
        location: NodeLocation,
    ) -> Result<(), NodeLocation> {
        let slot = global.slot();
        if self.slots.len() < slot + 1 {
            self.slots.resize(slot + 1, None);
        }
        match self.slots[slot] {
            Some(existing) => Err(existing),
            None => {
                self.slots[slot] = Some(location);
                self.mapped += 1;
                Ok(())
            }
        }
    }

    /// Resolve a global id; `None` for ids never claimed at discovery.
    pub fn get(&self, global: GlobalId) -> Option<NodeLocation> {
        self.slots.get(global.slot()).copied().flatten()
    }

    /// Number of slots (max global id + 1).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of mapped global ids.
    pub fn len(&self) -> usize {
        self.mapped
    }

    pub fn is_empty(&self) -> bool {
        self.mapped == 0
    }

    /// Iterate over mapped (global id, location) pairs in global id order.
    pub fn iter(&self) -> impl Iterator<Item = (GlobalId, NodeLocation)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.map(|location| (GlobalId::from_index(i as u32), location))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::Id;

    fn loc(region: u32, local: u32) -> NodeLocation {
        NodeLocation {
            region: Id::from_index(region),
            local: Id::from_index(local),
        }
    }

    #[test]
    fn grows_on_demand() {
        let mut index = GlobalIdIndex::new();
        assert_eq!(index.capacity(), 0);

        index.insert(Id::from_index(6), loc(0, 1)).unwrap();
        assert_eq!(index.capacity(), 7);
        assert_eq!(index.len(), 1);

        index.insert(Id::from_index(2), loc(0, 0)).unwrap();
        assert_eq!(index.capacity(), 7);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn unmapped_slots_are_distinguishable() {
        let mut index = GlobalIdIndex::new();
        index.insert(Id::from_index(5), loc(0, 0)).unwrap();

        assert_eq!(index.get(Id::from_index(5)), Some(loc(0, 0)));
        // Inside capacity but never claimed
        assert_eq!(index.get(Id::from_index(0)), None);
        // Past capacity
        assert_eq!(index.get(Id::from_index(999)), None);
    }

    #[test]
    fn collision_keeps_first_owner() {
        let mut index = GlobalIdIndex::new();
        index.insert(Id::from_index(3), loc(0, 0)).unwrap();
        let err = index.insert(Id::from_index(3), loc(1, 0)).unwrap_err();
        assert_eq!(err, loc(0, 0));
        assert_eq!(index.get(Id::from_index(3)), Some(loc(0, 0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn iter_in_global_order() {
        let mut index = GlobalIdIndex::new();
        index.insert(Id::from_index(4), loc(1, 0)).unwrap();
        index.insert(Id::from_index(1), loc(0, 0)).unwrap();

        let globals: Vec<u32> = index.iter().map(|(g, _)| g.index()).collect();
        assert_eq!(globals, vec![1, 4]);
    }
}
