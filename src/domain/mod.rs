//! Domain types for the parking lot: slots, allocation policy, errors.

pub mod allocation;
pub mod error;
pub mod slot;

pub use allocation::{select_lowest, Allocation, SlotRequirements};
pub use error::SlotError;
pub use slot::{parse_slot_number, validate_slot_number, NewSlot, ParkingSlot};
