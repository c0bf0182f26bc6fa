pub mod parking_service;

pub use parking_service::ParkingService;
