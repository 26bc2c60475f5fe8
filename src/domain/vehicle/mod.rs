// Vehicle aggregate module
// Exports the vehicle entity, its stays and the payload types

pub mod value_objects;
pub mod vehicle;

pub use value_objects::Plate;
pub use vehicle::{
    Attributes, NewVehicle, PayloadError, Stay, Vehicle, VehicleChanges, VehicleWithStays,
};
