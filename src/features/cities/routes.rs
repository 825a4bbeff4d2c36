use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::cities::handlers;
use crate::features::cities::services::CityService;

/// Create routes for the cities feature.
///
/// Paths are relative; `main.rs` nests the merged feature routers under
/// `/api` behind the bearer-token middleware.
pub fn routes(service: Arc<CityService>) -> Router {
    Router::new()
        .route("/cidades", get(handlers::list_cities))
        .route("/cidades", post(handlers::create_city))
        .route("/cidades/{id}", get(handlers::get_city))
        .route("/cidades/{id}", put(handlers::update_city))
        .route("/cidades/{id}", delete(handlers::delete_city))
        .with_state(service)
}
