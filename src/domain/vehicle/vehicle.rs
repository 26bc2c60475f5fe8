use super::value_objects::Plate;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Wire name of the plate field
pub const PLATE_FIELD: &str = "placa";
/// Accepted alternative name for the plate field on input
pub const PLATE_ALIAS: &str = "plate";
/// Wire name of the embedded stays, never writable through a vehicle payload
pub const STAYS_FIELD: &str = "estadias";

/// Caller-defined vehicle attributes (make, model, owner, ...)
pub type Attributes = Map<String, Value>;

/// Vehicle entity
///
/// Only the plate is known to this service. Every other attribute is an
/// opaque JSON value owned by the caller and flattened next to `placa`
/// when serialized.
///
/// # Example
/// ```
/// use serde_json::json;
/// use veiculos_api::domain::vehicle::{Plate, Vehicle};
///
/// let mut vehicle = Vehicle::new(Plate::new("ABC1234").unwrap());
/// vehicle.attributes.insert("modelo".into(), json!("Civic"));
///
/// assert_eq!(
///     serde_json::to_value(&vehicle).unwrap(),
///     json!({ "placa": "ABC1234", "modelo": "Civic" })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    #[serde(rename = "placa")]
    pub plate: Plate,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Vehicle {
    /// Creates a vehicle with no extra attributes
    pub fn new(plate: Plate) -> Self {
        Self {
            plate,
            attributes: Attributes::new(),
        }
    }

    /// Writes the supplied attributes over the current ones
    ///
    /// Keys missing from `changes` keep their stored value.
    pub fn apply(&mut self, changes: VehicleChanges) {
        for (key, value) in changes.attributes {
            self.attributes.insert(key, value);
        }
    }
}

/// A parking stay ("estadia") linked to a vehicle
///
/// Stays are owned by another part of the system; this service only
/// reads them when a single vehicle is fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stay {
    pub id: Uuid,
    #[serde(rename = "placa")]
    pub plate: Plate,
    #[serde(rename = "entrada")]
    pub entered_at: DateTime<Utc>,
    #[serde(rename = "saida")]
    pub left_at: Option<DateTime<Utc>>,
    #[serde(rename = "valor")]
    pub amount: Option<Decimal>,
}

/// A vehicle together with its stays, as returned by a single-vehicle read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleWithStays {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(rename = "estadias")]
    pub stays: Vec<Stay>,
}

/// Reasons a request body cannot be turned into a vehicle write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("O corpo da requisição deve ser um objeto JSON.")]
    NotAnObject,

    #[error("O campo placa é obrigatório.")]
    MissingPlate,

    #[error("Placa inválida: {0}.")]
    InvalidPlate(String),

    #[error("Os campos placa e plate foram enviados com valores diferentes.")]
    AmbiguousPlate,

    #[error("A placa de um veículo não pode ser alterada.")]
    PlateChanged,

    #[error("O campo {0} não pode ser gravado por este recurso.")]
    ReservedField(&'static str),
}

/// Validated payload for creating a vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub plate: Plate,
    pub attributes: Attributes,
}

impl NewVehicle {
    /// Builds a creation payload from a request body
    ///
    /// The body must be an object carrying a non-blank `placa` (or `plate`).
    pub fn from_payload(payload: Value) -> Result<Self, PayloadError> {
        let mut attributes = into_object(payload)?;
        let plate = take_plate(&mut attributes)?.ok_or(PayloadError::MissingPlate)?;
        reject_reserved(&attributes)?;

        Ok(Self { plate, attributes })
    }

    /// Converts the payload into the vehicle it describes
    pub fn into_vehicle(self) -> Vehicle {
        Vehicle {
            plate: self.plate,
            attributes: self.attributes,
        }
    }
}

/// Validated payload for updating a vehicle
///
/// Holds only the attributes to overwrite; the plate itself never changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VehicleChanges {
    pub attributes: Attributes,
}

impl VehicleChanges {
    /// Builds an update payload for the vehicle identified by `plate`
    ///
    /// A plate in the body is tolerated only when it matches `plate`.
    pub fn from_payload(plate: &Plate, payload: Value) -> Result<Self, PayloadError> {
        let mut attributes = into_object(payload)?;
        if let Some(supplied) = take_plate(&mut attributes)? {
            if &supplied != plate {
                return Err(PayloadError::PlateChanged);
            }
        }
        reject_reserved(&attributes)?;

        Ok(Self { attributes })
    }
}

fn into_object(payload: Value) -> Result<Attributes, PayloadError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(PayloadError::NotAnObject),
    }
}

/// Removes `placa` and `plate` from the attributes and validates them
fn take_plate(attributes: &mut Attributes) -> Result<Option<Plate>, PayloadError> {
    let primary = attributes.remove(PLATE_FIELD).map(parse_plate).transpose()?;
    let alias = attributes.remove(PLATE_ALIAS).map(parse_plate).transpose()?;

    match (primary, alias) {
        (Some(primary), Some(alias)) if primary != alias => Err(PayloadError::AmbiguousPlate),
        (Some(plate), _) | (None, Some(plate)) => Ok(Some(plate)),
        (None, None) => Ok(None),
    }
}

fn parse_plate(value: Value) -> Result<Plate, PayloadError> {
    match value {
        Value::String(raw) => Plate::new(raw).map_err(PayloadError::InvalidPlate),
        _ => Err(PayloadError::InvalidPlate(
            "a placa deve ser um texto".to_string(),
        )),
    }
}

fn reject_reserved(attributes: &Attributes) -> Result<(), PayloadError> {
    if attributes.contains_key(STAYS_FIELD) {
        return Err(PayloadError::ReservedField(STAYS_FIELD));
    }
    Ok(())
}
