//! The GraphQL mediator.
//!
//! One choke point for every Admin API call. The mediator serializes the
//! operation, attaches the shop's access token, posts to the versioned
//! GraphQL endpoint, and classifies the response into exactly one outcome:
//! a payload value, or one [`MediationError`] variant.

use serde_json::Value;

use crate::auth::AccessToken;
use crate::config::{BridgeConfig, ShopDomain};

use super::errors::{MediationError, UserError};
use super::operation::GraphqlOperation;

/// Header carrying the shop's access token on every Admin API call.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Executes GraphQL operations against the Admin API.
///
/// The mediator is cheap to clone (the inner `reqwest::Client` is an `Arc`)
/// and safe to share across tasks.
#[derive(Clone, Debug)]
pub struct GraphqlMediator {
    client: reqwest::Client,
    config: BridgeConfig,
}

impl GraphqlMediator {
    /// Creates a mediator for the given configuration.
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("failed to build HTTP client");
        Self { client, config }
    }

    fn endpoint(&self, shop: &ShopDomain) -> String {
        format!(
            "{}/admin/api/{}/graphql.json",
            self.config.upstream_base(shop),
            self.config.api_version(),
        )
    }

    /// Executes `operation` for `shop` and returns the root-field payload.
    ///
    /// # Errors
    ///
    /// - [`MediationError::Network`] if the request never completes
    /// - [`MediationError::Transport`] on any non-200 status
    /// - [`MediationError::Graphql`] if the body carries top-level `errors`
    /// - [`MediationError::UserErrors`] if the mutation reported `userErrors`
    /// - [`MediationError::Malformed`] if the 200 body is unusable
    pub async fn execute(
        &self,
        shop: &ShopDomain,
        token: &AccessToken,
        operation: &GraphqlOperation,
    ) -> Result<Value, MediationError> {
        tracing::debug!(shop = %shop, root_field = operation.root_field, "executing operation");

        let response = self
            .client
            .post(self.endpoint(shop))
            .header(ACCESS_TOKEN_HEADER, token.as_str())
            .json(&operation.request_body())
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(MediationError::Transport { status, body });
        }

        let body = response.text().await?;
        let body: Value =
            serde_json::from_str(&body).map_err(|e| MediationError::Malformed {
                reason: format!("response is not JSON: {e}"),
            })?;

        classify(operation.root_field, &body)
    }
}

/// Classifies a 200-status GraphQL response body.
///
/// Order matters: top-level `errors` preempt everything, then `userErrors`
/// nested under the root field, then a top-level `data.userErrors` fallback
/// for responses that put them beside the root field, then the payload.
fn classify(root_field: &str, body: &Value) -> Result<Value, MediationError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                        .to_string()
                })
                .collect();
            return Err(MediationError::Graphql { messages });
        }
    }

    let Some(data) = body.get("data") else {
        return Err(MediationError::Malformed {
            reason: "response has neither 'data' nor 'errors'".to_string(),
        });
    };

    let payload = data.get(root_field);

    let user_errors = payload
        .and_then(|p| p.get("userErrors"))
        .or_else(|| data.get("userErrors"));
    if let Some(raw) = user_errors {
        let errors: Vec<UserError> =
            serde_json::from_value(raw.clone()).map_err(|e| MediationError::Malformed {
                reason: format!("unreadable userErrors: {e}"),
            })?;
        if !errors.is_empty() {
            return Err(MediationError::UserErrors { errors });
        }
    }

    match payload {
        Some(payload) if !payload.is_null() => Ok(payload.clone()),
        _ => Err(MediationError::Malformed {
            reason: format!("response data has no '{root_field}' field"),
        }),
    }
}
