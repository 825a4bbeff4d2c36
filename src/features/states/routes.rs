use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::states::handlers;
use crate::features::states::services::StateService;

/// Create routes for the states feature.
///
/// Paths are relative; `main.rs` nests the merged feature routers under
/// `/api` behind the bearer-token middleware.
pub fn routes(service: Arc<StateService>) -> Router {
    Router::new()
        .route("/estados", get(handlers::list_states))
        .route("/estados/{uf}", get(handlers::get_state))
        .with_state(service)
}
