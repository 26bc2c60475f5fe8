use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, vehicles};
use crate::api::state::AppState;

/// Builds the application router with its middleware
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/veiculos",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route(
            "/veiculos/:placa",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .patch(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
