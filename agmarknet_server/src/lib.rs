//! HTTP surface for the unofficial Agmarknet price API.
//!
//! Thin axum layer over `agmarknet_api`: three GET routes, no persisted
//! state, no authentication. Scraping failure never surfaces here; the only
//! user-visible error is a missing query parameter.

pub mod routes;

pub use routes::{router, AppState};
