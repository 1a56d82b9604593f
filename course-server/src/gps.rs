//! Course GPS detail lookup.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::TtlCache;
use crate::gi::{GiClient, GiError, TokenManager};

/// GPS details change rarely, so they outlive search results in cache.
const GPS_TTL: Duration = Duration::from_secs(600);

/// Fetches per-course GPS detail, cached by course id.
pub struct GpsService {
    client: GiClient,
    tokens: Arc<TokenManager>,
    cache: TtlCache<String, Arc<Value>>,
}

impl GpsService {
    pub fn new(client: GiClient, tokens: Arc<TokenManager>) -> Self {
        Self {
            client,
            tokens,
            cache: TtlCache::new(GPS_TTL),
        }
    }

    /// Fetch GPS detail for a course group.
    ///
    /// Unlike search there is no fallback chain here: upstream failures
    /// propagate to the caller with their original status and body.
    pub async fn get(&self, public_id: &str) -> Result<Arc<Value>, GiError> {
        let key = public_id.to_string();
        if let Some(hit) = self.cache.get(&key).await {
            debug!(public_id, "gps cache hit");
            return Ok(hit);
        }

        let token = self.tokens.acquire().await?;
        let detail = self.client.course_group_gps(&token, public_id).await?;

        let entry = Arc::new(detail);
        self.cache.insert(key, entry.clone()).await;
        Ok(entry)
    }

    /// Number of cached details (for monitoring).
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
