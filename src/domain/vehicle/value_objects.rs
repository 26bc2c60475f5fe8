use serde::{Deserialize, Serialize};
use std::fmt;

/// Plate value object, the natural key of a vehicle
///
/// # Invariants
/// - Never blank
/// - Stored exactly as supplied, never normalized
/// - Immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plate(String);

impl Plate {
    /// Creates a new Plate value object
    ///
    /// # Returns
    /// * `Ok(Plate)` - If the plate has at least one visible character
    /// * `Err(String)` - If the plate is blank
    ///
    /// # Example
    /// ```
    /// use veiculos_api::domain::vehicle::Plate;
    ///
    /// let plate = Plate::new("ABC1234").expect("valid plate");
    /// assert_eq!(plate.as_str(), "ABC1234");
    /// assert_ne!(Plate::new(" ABC1234 ").unwrap(), plate);
    /// assert!(Plate::new("   ").is_err());
    /// ```
    pub fn new(plate: impl Into<String>) -> Result<Self, String> {
        let plate = plate.into();
        if plate.trim().is_empty() {
            return Err("a placa não pode ser vazia".to_string());
        }
        Ok(Plate(plate))
    }

    /// Returns the plate as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Plate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Plate::new(value)
    }
}

impl From<Plate> for String {
    fn from(plate: Plate) -> Self {
        plate.0
    }
}
