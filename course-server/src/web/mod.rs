//! Web layer for the course proxy.
//!
//! Routes inbound requests into the core services and serializes their
//! results; also serves the map client's static assets.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
