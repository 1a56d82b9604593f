//! Course search proxy server.
//!
//! Sits between a map-based web client and the GI golf-course data API:
//! hides GI's authentication flow, holds paid API responses in short-lived
//! caches, and retries searches across GI's inconsistent endpoints until one
//! yields usable results.

pub mod cache;
pub mod gi;
pub mod gps;
pub mod search;
pub mod web;
