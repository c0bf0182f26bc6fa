//! Allocation policy: which free slot an incoming vehicle gets.
//!
//! A slot qualifies when it is free and offers *at least* the requested
//! features. A slot with EV charging or cover may go to a vehicle that does
//! not need it. Among qualifying slots the lowest slot number wins, so the lot
//! fills from the bottom and allocation is reproducible.
//!
//! The store applies the same rule atomically in SQL
//! (see [`SlotStore::claim_first_free`](crate::storage::SlotStore::claim_first_free));
//! [`select_lowest`] is the in-memory rendition.

use crate::domain::slot::ParkingSlot;
use serde::Deserialize;
use utoipa::ToSchema;

/// Features a vehicle requires from its slot. Absent flags mean "not required".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct SlotRequirements {
    #[serde(default)]
    pub needs_ev: bool,
    #[serde(default)]
    pub needs_covered: bool,
}

impl SlotRequirements {
    pub fn new(needs_ev: bool, needs_covered: bool) -> Self {
        Self {
            needs_ev,
            needs_covered,
        }
    }

    /// True when `slot` is free and lacks none of the required features.
    pub fn accepts(&self, slot: &ParkingSlot) -> bool {
        !slot.is_occupied
            && (slot.is_ev_charging || !self.needs_ev)
            && (slot.is_covered || !self.needs_covered)
    }
}

/// Result of a park request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    Assigned(ParkingSlot),
    Unavailable,
}

impl Allocation {
    pub fn slot(&self) -> Option<&ParkingSlot> {
        match self {
            Allocation::Assigned(slot) => Some(slot),
            Allocation::Unavailable => None,
        }
    }
}

/// Picks the qualifying slot with the smallest number, if any.
pub fn select_lowest<'a, I>(slots: I, requirements: SlotRequirements) -> Option<&'a ParkingSlot>
where
    I: IntoIterator<Item = &'a ParkingSlot>,
{
    slots
        .into_iter()
        .filter(|slot| requirements.accepts(slot))
        .min_by_key(|slot| slot.slot_no)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(slot_no: i64, is_covered: bool, is_ev_charging: bool, is_occupied: bool) -> ParkingSlot {
        ParkingSlot {
            slot_no,
            is_covered,
            is_ev_charging,
            is_occupied,
        }
    }

    #[test]
    fn extra_features_are_acceptable() {
        let any = SlotRequirements::default();
        assert!(any.accepts(&slot(1, true, true, false)));
        assert!(any.accepts(&slot(2, false, false, false)));
    }

    #[test]
    fn missing_required_feature_disqualifies() {
        let ev = SlotRequirements::new(true, false);
        assert!(!ev.accepts(&slot(1, true, false, false)));
        assert!(ev.accepts(&slot(2, false, true, false)));

        let covered = SlotRequirements::new(false, true);
        assert!(!covered.accepts(&slot(3, false, true, false)));
        assert!(covered.accepts(&slot(4, true, false, false)));
    }

    #[test]
    fn occupied_slots_never_qualify() {
        let any = SlotRequirements::default();
        assert!(!any.accepts(&slot(1, true, true, true)));
    }

    #[test]
    fn lowest_qualifying_number_wins_regardless_of_order() {
        let slots = vec![
            slot(9, true, true, false),
            slot(2, true, false, true),
            slot(5, true, false, false),
            slot(1, false, false, false),
        ];
        let covered = SlotRequirements::new(false, true);
        assert_eq!(select_lowest(&slots, covered).map(|s| s.slot_no), Some(5));

        let any = SlotRequirements::default();
        assert_eq!(select_lowest(&slots, any).map(|s| s.slot_no), Some(1));
    }

    #[test]
    fn nothing_qualifies() {
        let slots = vec![slot(5, false, false, false)];
        assert!(select_lowest(&slots, SlotRequirements::new(true, false)).is_none());
    }
}
