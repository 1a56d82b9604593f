//! GI upstream API client.
//!
//! GI is the third-party golf-course data API this server proxies. Key
//! characteristics:
//! - everything sits behind a bearer token obtained via a
//!   client-credentials grant, and auth responses name the token and expiry
//!   fields inconsistently
//! - the two search endpoints have non-overlapping, undocumented coverage
//! - every call is billed, so callers cache aggressively

mod client;
mod error;
mod token;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GiClient, GiConfig};
pub use error::GiError;
pub use token::{Credential, TokenManager};
pub use types::{Coordinate, SearchBody, SearchEndpoint, TokenResponse, extract_course_list};
