//! Error types for the subscription bridge.
//!
//! Two error enums live here:
//!
//! - [`ConfigError`]: fail-fast validation errors raised by the newtype and
//!   builder constructors.
//! - [`BridgeError`]: the handler-facing failure taxonomy. Every variant maps
//!   to a deterministic HTTP status via [`BridgeError::status_code`], so
//!   endpoint handlers never have to interpret raw transport failures.

use thiserror::Error;

use crate::auth::oauth::OAuthError;
use crate::flows::{StepFailure, UpdateStep};
use crate::graphql::MediationError;

/// Errors raised while constructing configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key cannot be empty")]
    EmptyApiSecretKey,

    /// Shop domain is invalid.
    #[error("invalid shop domain '{domain}': expected 'shop-name' or 'shop-name.myshopify.com'")]
    InvalidShopDomain {
        /// The rejected domain.
        domain: String,
    },

    /// API version string is invalid.
    #[error("invalid API version '{version}': expected 'YYYY-MM' or 'unstable'")]
    InvalidApiVersion {
        /// The rejected version string.
        version: String,
    },

    /// OAuth scope string is invalid.
    #[error("invalid scopes: {reason}")]
    InvalidScopes {
        /// Why the scopes were rejected.
        reason: String,
    },

    /// Currency code is not a three-letter ISO 4217 code.
    #[error("invalid currency code '{code}': expected three uppercase ASCII letters")]
    InvalidCurrencyCode {
        /// The rejected code.
        code: String,
    },

    /// Host URL is invalid.
    #[error("invalid host URL '{url}': expected a URL with scheme, e.g. 'https://bridge.example.com'")]
    InvalidHostUrl {
        /// The rejected URL.
        url: String,
    },

    /// A required builder field was never set.
    #[error("missing required field '{field}'")]
    MissingRequiredField {
        /// Name of the missing field.
        field: &'static str,
    },
}

fn step_context(step: &Option<UpdateStep>) -> String {
    match step {
        Some(step) => format!(" during {step}"),
        None => String::new(),
    }
}

/// Handler-facing failure taxonomy.
///
/// Handlers translate inbound HTTP requests into bridge calls and translate
/// every `BridgeError` back into a response with [`status_code`]. The mapping
/// is fixed: caller mistakes are 400, missing credentials are 401, upstream
/// validation (`userErrors`) is 400, and everything the upstream platform got
/// wrong is 502.
///
/// [`status_code`]: BridgeError::status_code
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Inbound request is missing or has malformed parameters.
    #[error("invalid request: {reason}")]
    Validation {
        /// What was wrong with the request.
        reason: String,
    },

    /// No access token is stored for the shop.
    #[error("no access token stored for shop '{shop}'")]
    NotAuthenticated {
        /// The shop that has not completed OAuth.
        shop: String,
    },

    /// An upstream call failed.
    ///
    /// `step` is set when the failure occurred inside the multi-step
    /// subscription-update chain, so callers can see how far the chain got.
    #[error("upstream failure{}: {source}", step_context(.step))]
    Upstream {
        /// Chain step the failure occurred in, if any.
        step: Option<UpdateStep>,
        /// The classified upstream failure.
        #[source]
        source: MediationError,
    },
}

impl BridgeError {
    /// Returns the HTTP status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotAuthenticated { .. } => 401,
            Self::Upstream { source, .. } => match source {
                MediationError::UserErrors { .. } => 400,
                _ => 502,
            },
        }
    }
}

impl From<MediationError> for BridgeError {
    fn from(source: MediationError) -> Self {
        Self::Upstream { step: None, source }
    }
}

impl From<StepFailure> for BridgeError {
    fn from(failure: StepFailure) -> Self {
        Self::Upstream {
            step: Some(failure.step),
            source: failure.source,
        }
    }
}

impl From<OAuthError> for BridgeError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::InvalidSignature
            | OAuthError::StateMismatch { .. }
            | OAuthError::InvalidCallback { .. }
            | OAuthError::MissingHostConfig => Self::Validation {
                reason: err.to_string(),
            },
            OAuthError::ExchangeFailed { status, body } => Self::Upstream {
                step: None,
                source: MediationError::Transport { status, body },
            },
            OAuthError::MalformedTokenResponse { reason } => Self::Upstream {
                step: None,
                source: MediationError::Malformed { reason },
            },
            OAuthError::Network(e) => Self::Upstream {
                step: None,
                source: MediationError::Network(e),
            },
        }
    }
}
