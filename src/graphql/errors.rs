//! Classified GraphQL failure types.

use serde::Deserialize;
use thiserror::Error;

/// A single `userErrors` entry returned by an Admin API mutation.
///
/// `field` is the input path the error refers to (`["input", "email"]`) and
/// may be absent or explicitly null; `code` is the machine-readable error
/// code some mutations include.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UserError {
    /// Input path the error refers to, if any.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable description of the problem.
    pub message: String,
    /// Machine-readable error code, if the mutation provides one.
    #[serde(default)]
    pub code: Option<String>,
}

fn join_messages(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The classified outcome of a failed GraphQL call.
///
/// Classification is layered: network failures come first, then non-200
/// transport responses, then top-level GraphQL `errors`, then mutation
/// `userErrors`, and finally structurally unusable 200 responses.
#[derive(Debug, Error)]
pub enum MediationError {
    /// The request failed before an HTTP response arrived.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream endpoint answered with a non-200 status.
    #[error("transport failure with status {status}: {body}")]
    Transport {
        /// The HTTP status returned.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The response carried top-level GraphQL `errors` (syntax, auth,
    /// throttling).
    #[error("GraphQL errors: {}", .messages.join("; "))]
    Graphql {
        /// The error messages, in response order.
        messages: Vec<String>,
    },

    /// The mutation executed but reported domain-level `userErrors`.
    #[error("user errors: {}", join_messages(.errors))]
    UserErrors {
        /// The structured user errors, in response order.
        errors: Vec<UserError>,
    },

    /// The response was 200 but structurally unusable.
    #[error("malformed response: {reason}")]
    Malformed {
        /// Why the response could not be interpreted.
        reason: String,
    },
}

// Verify MediationError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MediationError>();
};
