use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::repositories::{RepositoryError, RepositoryResult, VehicleRepository};
use crate::domain::vehicle::{
    Attributes, NewVehicle, Plate, Stay, Vehicle, VehicleChanges, VehicleWithStays,
};

#[derive(Default)]
struct Store {
    vehicles: BTreeMap<Plate, Attributes>,
    stays: Vec<Stay>,
}

/// In-process implementation of VehicleRepository
///
/// Mirrors the PostgreSQL adapter: plates are unique, stays reference an
/// existing vehicle and block its deletion. Backs the API tests.
#[derive(Default)]
pub struct InMemoryVehicleRepository {
    store: RwLock<Store>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a stay for an existing vehicle
    pub async fn add_stay(&self, stay: Stay) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        if !store.vehicles.contains_key(&stay.plate) {
            return Err(RepositoryError::NotFound(stay.plate));
        }
        store.stays.push(stay);
        Ok(())
    }
}

fn to_vehicle(plate: &Plate, attributes: &Attributes) -> Vehicle {
    Vehicle {
        plate: plate.clone(),
        attributes: attributes.clone(),
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn list(&self) -> RepositoryResult<Vec<Vehicle>> {
        let store = self.store.read().await;
        Ok(store
            .vehicles
            .iter()
            .map(|(plate, attributes)| to_vehicle(plate, attributes))
            .collect())
    }

    async fn find_by_plate(&self, plate: &Plate) -> RepositoryResult<Option<VehicleWithStays>> {
        let store = self.store.read().await;
        let Some(attributes) = store.vehicles.get(plate) else {
            return Ok(None);
        };

        let mut stays: Vec<Stay> = store
            .stays
            .iter()
            .filter(|stay| &stay.plate == plate)
            .cloned()
            .collect();
        stays.sort_by_key(|stay| stay.entered_at);

        Ok(Some(VehicleWithStays {
            vehicle: to_vehicle(plate, attributes),
            stays,
        }))
    }

    async fn exists(&self, plate: &Plate) -> RepositoryResult<bool> {
        Ok(self.store.read().await.vehicles.contains_key(plate))
    }

    async fn create(&self, vehicle: NewVehicle) -> RepositoryResult<Vehicle> {
        let mut store = self.store.write().await;
        if store.vehicles.contains_key(&vehicle.plate) {
            return Err(RepositoryError::Conflict(vehicle.plate));
        }

        let created = vehicle.into_vehicle();
        store
            .vehicles
            .insert(created.plate.clone(), created.attributes.clone());
        Ok(created)
    }

    async fn update(&self, plate: &Plate, changes: VehicleChanges) -> RepositoryResult<Vehicle> {
        let mut store = self.store.write().await;
        let attributes = store
            .vehicles
            .get_mut(plate)
            .ok_or_else(|| RepositoryError::NotFound(plate.clone()))?;

        let mut vehicle = to_vehicle(plate, attributes);
        vehicle.apply(changes);
        *attributes = vehicle.attributes.clone();
        Ok(vehicle)
    }

    async fn delete(&self, plate: &Plate) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        if !store.vehicles.contains_key(plate) {
            return Err(RepositoryError::NotFound(plate.clone()));
        }
        if store.stays.iter().any(|stay| &stay.plate == plate) {
            return Err(RepositoryError::Other(format!(
                "O veículo {} possui estadias registradas e não pode ser excluído",
                plate
            )));
        }

        store.vehicles.remove(plate);
        Ok(())
    }
}
