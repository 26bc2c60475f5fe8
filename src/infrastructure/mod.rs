// Infrastructure layer module
// Contains the database bootstrap and the repository adapters

pub mod database;
pub mod repositories;
