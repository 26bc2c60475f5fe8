use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::repositories::RepositoryError;
use crate::domain::vehicle::{NewVehicle, Plate, Vehicle, VehicleChanges, VehicleWithStays};

const READ_FAILED: &str = "Erro ao buscar veículos";
const NOT_FOUND: &str = "Veículo não encontrado";
const CREATE_FAILED: &str = "Erro ao criar veículo";
const PLATE_TAKEN: &str = "A placa fornecida já está cadastrada.";
const UPDATE_NOT_FOUND: &str = "Veículo não encontrado para atualização";
const UPDATE_FAILED: &str = "Erro ao atualizar veículo";
const DELETE_NOT_FOUND: &str = "Veículo não encontrado para exclusão";
const DELETE_FAILED: &str = "Erro ao excluir veículo";
const CHECK_PLATE: &str = "Verifique a placa fornecida.";

fn not_found(placa: &str) -> ApiError {
    ApiError::not_found(
        NOT_FOUND,
        format!("Nenhum veículo cadastrado com a placa {}.", placa),
    )
}

/// Turns an extracted JSON body into a value, or a 400 with the given title
fn body_or_bad_request(
    payload: Result<Json<Value>, JsonRejection>,
    erro: &str,
) -> Result<Value, ApiError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected request body");
        ApiError::bad_request(erro, rejection.body_text())
    })
}

/// List all vehicles
///
/// GET /veiculos
pub async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let vehicles = state.vehicles.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list vehicles");
        ApiError::internal_server_error(READ_FAILED, e.to_string())
    })?;

    Ok(Json(vehicles))
}

/// Get a vehicle and its stays by plate
///
/// GET /veiculos/:placa
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(placa): Path<String>,
) -> Result<Json<VehicleWithStays>, ApiError> {
    // A blank plate can never be stored, so it is simply absent
    let plate = Plate::new(placa.as_str()).map_err(|_| {
        tracing::info!(placa = %placa, "Vehicle not found");
        not_found(&placa)
    })?;

    let vehicle = state
        .vehicles
        .find_by_plate(&plate)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, placa = %plate, "Failed to fetch vehicle");
            ApiError::internal_server_error(READ_FAILED, e.to_string())
        })?
        .ok_or_else(|| {
            tracing::info!(placa = %plate, "Vehicle not found");
            not_found(plate.as_str())
        })?;

    Ok(Json(vehicle))
}

/// Register a new vehicle
///
/// POST /veiculos
pub async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Vehicle>), ApiError> {
    let payload = body_or_bad_request(payload, CREATE_FAILED)?;
    let new_vehicle = NewVehicle::from_payload(payload).map_err(|e| {
        tracing::warn!(error = %e, "Invalid vehicle payload");
        ApiError::bad_request(CREATE_FAILED, e.to_string())
    })?;

    // Early answer only; the insert below is what actually guards uniqueness
    let taken = state
        .vehicles
        .exists(&new_vehicle.plate)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, placa = %new_vehicle.plate, "Failed to check plate");
            ApiError::bad_request(CREATE_FAILED, e.to_string())
        })?;
    if taken {
        tracing::warn!(placa = %new_vehicle.plate, "Plate already registered");
        return Err(ApiError::bad_request(CREATE_FAILED, PLATE_TAKEN));
    }

    let vehicle = state
        .vehicles
        .create(new_vehicle)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(plate) => {
                tracing::warn!(placa = %plate, "Plate registered concurrently");
                ApiError::bad_request(CREATE_FAILED, PLATE_TAKEN)
            }
            other => {
                tracing::error!(error = %other, "Failed to create vehicle");
                ApiError::bad_request(CREATE_FAILED, other.to_string())
            }
        })?;

    tracing::info!(placa = %vehicle.plate, "Vehicle created");
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Update some or all attributes of a vehicle
///
/// PUT /veiculos/:placa
/// PATCH /veiculos/:placa
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(placa): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Vehicle>), ApiError> {
    let plate = Plate::new(placa.as_str()).map_err(|_| {
        tracing::info!(placa = %placa, "Vehicle not found for update");
        ApiError::not_found(UPDATE_NOT_FOUND, CHECK_PLATE)
    })?;

    let payload = body_or_bad_request(payload, UPDATE_FAILED)?;
    let changes = VehicleChanges::from_payload(&plate, payload).map_err(|e| {
        tracing::warn!(error = %e, placa = %plate, "Invalid vehicle changes");
        ApiError::bad_request(UPDATE_FAILED, e.to_string())
    })?;

    let vehicle = state
        .vehicles
        .update(&plate, changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound(plate) => {
                tracing::info!(placa = %plate, "Vehicle not found for update");
                ApiError::not_found(UPDATE_NOT_FOUND, CHECK_PLATE)
            }
            other => {
                tracing::error!(error = %other, placa = %plate, "Failed to update vehicle");
                ApiError::bad_request(UPDATE_FAILED, other.to_string())
            }
        })?;

    Ok((StatusCode::ACCEPTED, Json(vehicle)))
}

/// Delete a vehicle
///
/// DELETE /veiculos/:placa
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(placa): Path<String>,
) -> Result<StatusCode, ApiError> {
    let plate = Plate::new(placa.as_str()).map_err(|_| {
        tracing::info!(placa = %placa, "Vehicle not found for deletion");
        ApiError::not_found(DELETE_NOT_FOUND, CHECK_PLATE)
    })?;

    state.vehicles.delete(&plate).await.map_err(|e| match e {
        RepositoryError::NotFound(plate) => {
            tracing::info!(placa = %plate, "Vehicle not found for deletion");
            ApiError::not_found(DELETE_NOT_FOUND, CHECK_PLATE)
        }
        other => {
            tracing::error!(error = %other, placa = %plate, "Failed to delete vehicle");
            ApiError::bad_request(DELETE_FAILED, other.to_string())
        }
    })?;

    tracing::info!(placa = %plate, "Vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}
