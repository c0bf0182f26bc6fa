//! The parking slot entity and slot-number validation.

use crate::domain::error::SlotError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single parking space.
///
/// `is_covered` and `is_ev_charging` are fixed when the slot is registered;
/// only `is_occupied` changes afterwards (park sets it, remove clears it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParkingSlot {
    pub slot_no: i64,
    pub is_covered: bool,
    pub is_ev_charging: bool,
    pub is_occupied: bool,
}

/// Attributes of a slot about to be registered. New slots always start free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewSlot {
    pub slot_no: i64,
    #[serde(default)]
    pub is_covered: bool,
    #[serde(default)]
    pub is_ev_charging: bool,
}

impl NewSlot {
    pub fn into_slot(self) -> ParkingSlot {
        ParkingSlot {
            slot_no: self.slot_no,
            is_covered: self.is_covered,
            is_ev_charging: self.is_ev_charging,
            is_occupied: false,
        }
    }
}

/// Slot numbers are positive integers.
pub fn validate_slot_number(slot_no: i64) -> Result<i64, SlotError> {
    if slot_no <= 0 {
        return Err(SlotError::NonPositiveSlotNumber(slot_no));
    }
    Ok(slot_no)
}

/// Parses a slot number typed into a form field.
///
/// Surrounding whitespace is ignored; anything that is not a base-10 integer
/// is rejected before the sign is checked.
pub fn parse_slot_number(raw: &str) -> Result<i64, SlotError> {
    let slot_no = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| SlotError::InvalidSlotNumber(raw.to_string()))?;
    validate_slot_number(slot_no)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!(parse_slot_number("7").unwrap(), 7);
        assert_eq!(parse_slot_number("  12 ").unwrap(), 12);
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "abc", "1.5", "12a", "99999999999999999999"] {
            assert!(
                matches!(parse_slot_number(raw), Err(SlotError::InvalidSlotNumber(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(matches!(
            parse_slot_number("0"),
            Err(SlotError::NonPositiveSlotNumber(0))
        ));
        assert!(matches!(
            parse_slot_number("-3"),
            Err(SlotError::NonPositiveSlotNumber(-3))
        ));
    }

    #[test]
    fn new_slots_start_free() {
        let slot = NewSlot {
            slot_no: 4,
            is_covered: true,
            is_ev_charging: false,
        }
        .into_slot();
        assert!(!slot.is_occupied);
        assert!(slot.is_covered);
        assert!(!slot.is_ev_charging);
    }
}
