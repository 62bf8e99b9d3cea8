//! OAuth-specific error types.

use thiserror::Error;

/// Errors that can occur during the OAuth flow.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The callback's HMAC signature did not match.
    #[error("callback HMAC signature validation failed")]
    InvalidSignature,

    /// The callback's state parameter did not match the expected value.
    #[error("state parameter mismatch: expected '{expected}', received '{received}'")]
    StateMismatch {
        /// The state generated when authorization began.
        expected: String,
        /// The state the callback carried.
        received: String,
    },

    /// Callback parameters are missing or malformed.
    #[error("invalid callback: {reason}")]
    InvalidCallback {
        /// What is wrong with the callback.
        reason: String,
    },

    /// The bridge host is not configured, so no redirect URI can be built.
    #[error("host URL must be configured to begin authorization")]
    MissingHostConfig,

    /// The token endpoint returned a non-200 status.
    #[error("token exchange failed with status {status}: {body}")]
    ExchangeFailed {
        /// The HTTP status returned.
        status: u16,
        /// The response body.
        body: String,
    },

    /// The token endpoint returned 200 but the body had no usable
    /// `access_token` field.
    #[error("malformed token response: {reason}")]
    MalformedTokenResponse {
        /// Why the response could not be used.
        reason: String,
    },

    /// A network-level error occurred before any response was received.
    #[error("network error during token exchange: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_failed_includes_status_and_body() {
        let err = OAuthError::ExchangeFailed {
            status: 401,
            body: "invalid client credentials".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("invalid client credentials"));
    }

    #[test]
    fn test_malformed_response_is_distinct_from_exchange_failure() {
        let err = OAuthError::MalformedTokenResponse {
            reason: "missing access_token".to_string(),
        };
        assert!(err.to_string().contains("malformed token response"));
    }

    #[test]
    fn test_state_mismatch_names_both_values() {
        let err = OAuthError::StateMismatch {
            expected: "abc".to_string(),
            received: "xyz".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("abc"));
        assert!(message.contains("xyz"));
    }
}
