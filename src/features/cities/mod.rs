//! City CRUD feature.
//!
//! Cities belong to a state through `state_uf`; the store enforces the
//! foreign key and the `(name, state_uf)` uniqueness invariant, and the
//! service maps constraint violations to the API error taxonomy.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/cidades` | List cities (paginated) |
//! | GET | `/api/cidades/{id}` | Get city by id |
//! | POST | `/api/cidades` | Create city |
//! | PUT | `/api/cidades/{id}` | Update city |
//! | DELETE | `/api/cidades/{id}` | Delete city |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CityService;
