// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_vehicle_repository;
pub mod postgres_vehicle_repository;

pub use in_memory_vehicle_repository::InMemoryVehicleRepository;
pub use postgres_vehicle_repository::PostgresVehicleRepository;
