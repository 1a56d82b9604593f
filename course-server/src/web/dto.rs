//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query parameters for course search.
#[derive(Debug, Deserialize)]
pub struct CourseSearchRequest {
    /// Free-text search query
    pub q: String,

    /// Optional latitude to bias results toward
    pub lat: Option<f64>,

    /// Optional longitude to bias results toward
    pub lng: Option<f64>,
}

/// Query parameters for the GPS detail lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsRequest {
    /// GI public course identifier
    pub public_id: String,
}

/// Response for the auth diagnostic endpoint.
#[derive(Debug, Serialize)]
pub struct AuthCheckResponse {
    /// Whether a credential could be acquired
    pub ok: bool,

    /// Redacted token preview, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Failure description, present on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generic error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
