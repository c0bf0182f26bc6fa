pub mod slot_store;

pub use slot_store::{SlotCounts, SlotStore};
