//! Bearer-token lifecycle.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;

use super::client::GiClient;
use super::error::GiError;

/// A credential this close to expiry (seconds) is treated as expired, so a
/// token returned by `acquire` always survives the call it is used for.
const EXPIRY_MARGIN_SECS: i64 = 10;

/// A bearer credential and its hard expiry.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Whether at least the safety margin of lifetime remains.
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now >= Duration::seconds(EXPIRY_MARGIN_SECS)
    }
}

/// Acquires and caches the GI bearer credential.
///
/// The credential is replaced wholesale on refresh, never partially mutated.
/// The lock is not held across the auth round-trip, so concurrent
/// acquisitions under an expired credential may each hit the identity
/// endpoint; upstream auth is idempotent and the last write wins.
pub struct TokenManager {
    client: GiClient,
    credential: RwLock<Option<Credential>>,
}

impl TokenManager {
    pub fn new(client: GiClient) -> Self {
        Self {
            client,
            credential: RwLock::new(None),
        }
    }

    /// Return a token with at least the safety margin of lifetime left,
    /// refreshing from the identity endpoint only when needed.
    pub async fn acquire(&self) -> Result<String, GiError> {
        {
            let guard = self.credential.read().await;
            if let Some(credential) = guard.as_ref()
                && credential.is_fresh(Utc::now())
            {
                return Ok(credential.token.clone());
            }
        }

        let response = self.client.authenticate().await?;
        let expires_in_secs = response.expires_in_secs;
        let credential = Credential {
            token: response.token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        };
        info!(expires_in_secs, "refreshed GI bearer token");

        let token = credential.token.clone();
        let mut guard = self.credential.write().await;
        *guard = Some(credential);

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gi::client::GiConfig;
    use crate::gi::testing::StubBuilder;

    fn manager(base_url: &str) -> TokenManager {
        let config = GiConfig::new(base_url, "client-1", "s3cret");
        TokenManager::new(GiClient::new(config).unwrap())
    }

    #[test]
    fn freshness_honors_margin() {
        let now = Utc::now();

        let fresh = Credential {
            token: "t".into(),
            expires_at: now + Duration::seconds(60),
        };
        assert!(fresh.is_fresh(now));

        let inside_margin = Credential {
            token: "t".into(),
            expires_at: now + Duration::seconds(5),
        };
        assert!(!inside_margin.is_fresh(now));

        let expired = Credential {
            token: "t".into(),
            expires_at: now - Duration::seconds(1),
        };
        assert!(!expired.is_fresh(now));
    }

    #[tokio::test]
    async fn acquire_reuses_fresh_token() {
        let stub = StubBuilder::new()
            .auth_response(200, r#"{"access_token": "tok-1", "expires_in": 3600}"#)
            .spawn()
            .await;
        let manager = manager(&stub.base_url);

        assert_eq!(manager.acquire().await.unwrap(), "tok-1");
        assert_eq!(manager.acquire().await.unwrap(), "tok-1");
        assert_eq!(manager.acquire().await.unwrap(), "tok-1");

        assert_eq!(stub.auth_calls(), 1);
    }

    #[tokio::test]
    async fn acquire_refreshes_inside_margin() {
        // Lifetime below the safety margin: every acquire refetches.
        let stub = StubBuilder::new()
            .auth_response(200, r#"{"access_token": "tok-1", "expires_in": 5}"#)
            .spawn()
            .await;
        let manager = manager(&stub.base_url);

        manager.acquire().await.unwrap();
        manager.acquire().await.unwrap();

        assert_eq!(stub.auth_calls(), 2);
    }

    #[tokio::test]
    async fn acquire_accepts_camel_case_convention() {
        let stub = StubBuilder::new()
            .auth_response(200, r#"{"token": "tok-camel", "expiresIn": 3600}"#)
            .spawn()
            .await;
        let manager = manager(&stub.base_url);

        assert_eq!(manager.acquire().await.unwrap(), "tok-camel");
        assert_eq!(stub.auth_calls(), 1);
    }

    #[tokio::test]
    async fn rejected_auth_carries_status_and_body() {
        let stub = StubBuilder::new()
            .auth_response(401, "bad secret")
            .spawn()
            .await;
        let manager = manager(&stub.base_url);

        match manager.acquire().await.unwrap_err() {
            GiError::Auth { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad secret");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn tokenless_response_is_an_auth_failure() {
        let stub = StubBuilder::new()
            .auth_response(200, r#"{"status": "ok"}"#)
            .spawn()
            .await;
        let manager = manager(&stub.base_url);

        let err = manager.acquire().await.unwrap_err();
        assert!(matches!(err, GiError::MissingToken));
        assert!(err.is_auth());
    }
}
