//! Wire types for the GI API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Candidate field names for the bearer token in an auth response, tried in
/// order. GI uses both conventions depending on deployment.
const TOKEN_FIELDS: &[&str] = &["access_token", "token"];

/// Candidate field names for the token lifetime in seconds, tried in order.
const EXPIRY_FIELDS: &[&str] = &["expires_in", "expiresIn"];

/// Lifetime assumed when the auth response omits an expiry (seconds).
const DEFAULT_EXPIRY_SECS: i64 = 3300;

/// A latitude/longitude pair as GI expects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Request body shared by both search endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub rows: u32,
    pub offset: u32,
    pub keywords: String,
    pub country_code: String,
    pub region_code: String,
    pub gps_coordinate: Coordinate,
}

/// The two GI search endpoints. Their coverage is non-overlapping and
/// undocumented, which is why callers try both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEndpoint {
    CourseGroups,
    Courses,
}

impl SearchEndpoint {
    /// Path segment under `{base}/courses/`.
    pub fn path(self) -> &'static str {
        match self {
            SearchEndpoint::CourseGroups => "searchCourseGroups",
            SearchEndpoint::Courses => "searchCourses",
        }
    }
}

/// Parsed authentication response.
#[derive(Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in_secs: i64,
}

impl TokenResponse {
    /// Extract token and expiry from an auth response body.
    ///
    /// Each candidate field name is tried in sequence. Returns `None` when no
    /// convention yields a non-empty token.
    pub fn from_json(body: &Value) -> Option<Self> {
        let token = TOKEN_FIELDS
            .iter()
            .find_map(|field| body.get(field).and_then(Value::as_str))
            .filter(|token| !token.is_empty())?
            .to_string();

        let expires_in_secs = EXPIRY_FIELDS
            .iter()
            .find_map(|field| body.get(field).and_then(Value::as_i64))
            .unwrap_or(DEFAULT_EXPIRY_SECS);

        Some(Self {
            token,
            expires_in_secs,
        })
    }
}

/// Pull the course list out of a search response.
///
/// GI returns either `{"data": [...]}` or a bare array depending on the
/// endpoint. Anything else counts as zero results.
pub fn extract_course_list(body: &Value) -> Vec<Value> {
    match body.get("data") {
        Some(Value::Array(items)) => items.clone(),
        _ => match body {
            Value::Array(items) => items.clone(),
            _ => Vec::new(),
        },
    }
}
