//! API client pipeline for the catalog front end.
//!
//! Mirrors the browser client: a session object carrying the bearer token
//! (persisted under a fixed key), a request pipeline with a single
//! automatic re-authentication retry on 401, typed endpoint wrappers, and
//! a UI controller owning the local caches.

mod api_client;
mod catalog;
mod session;

pub use api_client::{ApiClient, ApiSession, ClientError, Payload};
pub use catalog::{filter_cities, CatalogController};
pub use session::{FileTokenStore, MemoryTokenStore, StdinTokenSource, TokenSource, TokenStore};
