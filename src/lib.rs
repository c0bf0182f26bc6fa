pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::parking_service::ParkingService;
pub use domain::{Allocation, NewSlot, ParkingSlot, SlotError, SlotRequirements};
pub use storage::SlotStore;
