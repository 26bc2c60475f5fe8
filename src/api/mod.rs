// API layer module (HTTP adapter)
// Handlers translate requests into repository calls and map the outcome to a status

pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
