use std::sync::Arc;

use crate::domain::repositories::VehicleRepository;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<dyn VehicleRepository>,
}

impl AppState {
    pub fn new(vehicles: Arc<dyn VehicleRepository>) -> Self {
        Self { vehicles }
    }
}
