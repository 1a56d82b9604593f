//! Application state for the web layer.

use std::sync::Arc;

use crate::gi::TokenManager;
use crate::gps::GpsService;
use crate::search::SearchService;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Course search with fallback and caching
    pub search: Arc<SearchService>,

    /// GPS detail lookup
    pub gps: Arc<GpsService>,

    /// Bearer-token lifecycle (shared with both services above)
    pub tokens: Arc<TokenManager>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(search: SearchService, gps: GpsService, tokens: Arc<TokenManager>) -> Self {
        Self {
            search: Arc::new(search),
            gps: Arc::new(gps),
            tokens,
        }
    }
}
