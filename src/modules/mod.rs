//! Modules layer - components that face outward from the HTTP API
//!
//! Currently holds the API client pipeline consumed by the front end.

// The server binary does not call into the client pipeline; it ships as
// part of this crate and is exercised by its tests.
#[allow(dead_code)]
pub mod client;
