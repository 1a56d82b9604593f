//! GI client error types.

/// Errors that can occur when interacting with the GI API.
#[derive(Debug, thiserror::Error)]
pub enum GiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity endpoint rejected the authentication request
    #[error("authentication failed ({status}): {body}")]
    Auth { status: u16, body: String },

    /// The auth response carried no usable token under either field convention
    #[error("auth response contained no usable token")]
    MissingToken,

    /// A non-auth upstream call returned an error status
    #[error("upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl GiError {
    /// True when the failure came from credential acquisition.
    ///
    /// These are the only errors that abort a search; everything else in the
    /// fallback ladder is absorbed.
    pub fn is_auth(&self) -> bool {
        matches!(self, GiError::Auth { .. } | GiError::MissingToken)
    }
}
