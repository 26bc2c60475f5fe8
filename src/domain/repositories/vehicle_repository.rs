use async_trait::async_trait;
use thiserror::Error;

use crate::domain::vehicle::{NewVehicle, Plate, Vehicle, VehicleChanges, VehicleWithStays};

/// Outcome of a failed data-access call
///
/// Adapters translate their store-specific failures into these variants
/// so handlers never look at driver error codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Veículo não encontrado: {0}")]
    NotFound(Plate),

    #[error("Placa já cadastrada: {0}")]
    Conflict(Plate),

    #[error("{0}")]
    Other(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for the Vehicle entity
///
/// Defines the contract for persisting and retrieving vehicles.
/// Implementations must enforce plate uniqueness themselves: `create`
/// returns `Conflict` when the plate is taken, even if a caller checked
/// `exists` beforehand.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// List every vehicle, ordered by plate, without stays
    async fn list(&self) -> RepositoryResult<Vec<Vehicle>>;

    /// Find a vehicle by plate, including its stays
    async fn find_by_plate(&self, plate: &Plate) -> RepositoryResult<Option<VehicleWithStays>>;

    /// Check whether a plate is already registered
    async fn exists(&self, plate: &Plate) -> RepositoryResult<bool>;

    /// Insert a new vehicle
    async fn create(&self, vehicle: NewVehicle) -> RepositoryResult<Vehicle>;

    /// Merge the supplied attributes into an existing vehicle
    async fn update(&self, plate: &Plate, changes: VehicleChanges) -> RepositoryResult<Vehicle>;

    /// Delete a vehicle by plate
    async fn delete(&self, plate: &Plate) -> RepositoryResult<()>;
}
