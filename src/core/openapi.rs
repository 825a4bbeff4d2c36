use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::cities::{dtos as cities_dtos, handlers as cities_handlers};
use crate::features::states::{dtos as states_dtos, handlers as states_handlers};
use crate::shared::types::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    paths(
        // States (read-only)
        states_handlers::list_states,
        states_handlers::get_state,
        // Cities
        cities_handlers::list_cities,
        cities_handlers::get_city,
        cities_handlers::create_city,
        cities_handlers::update_city,
        cities_handlers::delete_city,
    ),
    components(
        schemas(
            ErrorBody,
            states_dtos::StateResponseDto,
            cities_dtos::CityResponseDto,
            cities_dtos::CityPayloadDto,
        )
    ),
    tags(
        (name = "states", description = "Read-only state catalog"),
        (name = "cities", description = "City CRUD"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Geo Catalog API",
        version = "0.1.0",
        description = "CRUD API for states and cities",
    )
)]
pub struct ApiDoc;

/// Adds the static bearer-token security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
