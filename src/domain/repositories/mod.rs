// Repository interfaces (ports)
// Implemented by the adapters in infrastructure::repositories

pub mod vehicle_repository;

pub use vehicle_repository::{RepositoryError, RepositoryResult, VehicleRepository};
