//! The parking service.
//!
//! Sits between the transport layer and the [`SlotStore`]. Each operation is a
//! single-shot transaction: list, add, park, release.

use crate::domain::error::{Result, SlotError};
use crate::domain::{validate_slot_number, Allocation, NewSlot, ParkingSlot, SlotRequirements};
use crate::storage::{SlotCounts, SlotStore};

/// Owns the store handle shared by all requests.
#[derive(Clone)]
pub struct ParkingService {
    store: SlotStore,
}

impl ParkingService {
    pub fn new(store: SlotStore) -> Self {
        Self { store }
    }

    /// Connects to `database_url` and prepares the schema.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let store = SlotStore::connect(database_url, max_connections).await?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    pub async fn list_slots(&self) -> Result<Vec<ParkingSlot>> {
        self.store.list_all().await
    }

    pub async fn find_slot(&self, slot_no: i64) -> Result<Option<ParkingSlot>> {
        self.store.find_by_slot_number(slot_no).await
    }

    pub async fn counts(&self) -> Result<SlotCounts> {
        self.store.counts().await
    }

    /// Registers a new free slot.
    ///
    /// Non-positive numbers are rejected before touching the store. An existing
    /// number is a [`SlotError::Conflict`] and leaves the existing row as it was.
    pub async fn add_slot(&self, new_slot: NewSlot) -> Result<ParkingSlot> {
        validate_slot_number(new_slot.slot_no)?;

        if self.store.find_by_slot_number(new_slot.slot_no).await?.is_some() {
            tracing::info!(slot_no = new_slot.slot_no, "slot already registered");
            return Err(SlotError::Conflict(new_slot.slot_no));
        }

        let slot = self.store.insert(new_slot).await?;
        tracing::info!(
            slot_no = slot.slot_no,
            covered = slot.is_covered,
            ev_charging = slot.is_ev_charging,
            "slot added"
        );
        Ok(slot)
    }

    /// Assigns the lowest-numbered free slot that has every required feature.
    pub async fn park(&self, requirements: SlotRequirements) -> Result<Allocation> {
        match self.store.claim_first_free(requirements).await? {
            Some(slot) => {
                debug_assert!(requirements.accepts(&ParkingSlot {
                    is_occupied: false,
                    ..slot
                }));
                tracing::info!(
                    slot_no = slot.slot_no,
                    needs_ev = requirements.needs_ev,
                    needs_covered = requirements.needs_covered,
                    "vehicle parked"
                );
                Ok(Allocation::Assigned(slot))
            }
            None => {
                tracing::info!(
                    needs_ev = requirements.needs_ev,
                    needs_covered = requirements.needs_covered,
                    "no slot available"
                );
                Ok(Allocation::Unavailable)
            }
        }
    }

    /// Frees a slot. Unknown slot numbers are a no-op; the return value says
    /// whether a row was touched.
    pub async fn release(&self, slot_no: i64) -> Result<bool> {
        let touched = self.store.set_occupied(slot_no, false).await?;
        if touched {
            tracing::info!(slot_no, "slot released");
        } else {
            tracing::debug!(slot_no, "release of unknown slot ignored");
        }
        Ok(touched)
    }
}
