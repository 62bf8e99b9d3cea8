//! The bridge facade.
//!
//! [`Bridge`] wires the configuration, credential store, OAuth flow, and
//! GraphQL mediator together behind the methods endpoint handlers call.
//! Each method returns a typed payload or a [`BridgeError`], and every
//! `BridgeError` maps to one HTTP status via
//! [`BridgeError::status_code`], so handlers stay pure translation layers.

use std::sync::Arc;

use serde_json::Value;

use crate::auth::oauth::{
    begin_auth, validate_callback, AuthorizeRedirect, CallbackQuery, StateParam,
};
use crate::auth::{AccessToken, TokenStore};
use crate::config::{BridgeConfig, ShopDomain};
use crate::error::BridgeError;
use crate::flows::add_line_and_commit;
use crate::graphql::{GraphqlMediator, MediationError};
use crate::operations::{
    customer_update, subscription_contract_create, subscription_contract_update,
    subscription_draft_commit, Customer, CustomerUpdate, SubscriptionContract,
    SubscriptionContractCreate, SubscriptionDraft, SubscriptionLine,
};

/// The top-level entry point for endpoint handlers.
///
/// Construct one per process and share it; the bridge is `Send + Sync` and
/// every method takes `&self`.
pub struct Bridge {
    config: BridgeConfig,
    store: Arc<dyn TokenStore>,
    mediator: GraphqlMediator,
}

impl Bridge {
    /// Creates a bridge over the given configuration and credential store.
    #[must_use]
    pub fn new(config: BridgeConfig, store: Arc<dyn TokenStore>) -> Self {
        let mediator = GraphqlMediator::new(config.clone());
        Self {
            config,
            store,
            mediator,
        }
    }

    /// Returns the configuration the bridge was built with.
    #[must_use]
    pub const fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Starts the OAuth flow for a shop.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] if `shop` is empty or malformed,
    /// or if no bridge host is configured.
    pub fn begin_auth(
        &self,
        shop: &str,
        redirect_path: &str,
    ) -> Result<AuthorizeRedirect, BridgeError> {
        let shop = parse_shop(shop)?;
        Ok(begin_auth(&self.config, &shop, redirect_path)?)
    }

    /// Completes the OAuth flow from a callback.
    ///
    /// Validates the callback signature and state, exchanges the code, and
    /// stores the resulting token. Returns only the shop domain; the token
    /// stays inside the credential store.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] for a missing code or shop or a
    /// failed signature/state check, and [`BridgeError::Upstream`] if the
    /// exchange itself fails.
    pub async fn complete_auth(
        &self,
        query: &CallbackQuery,
        expected_state: &StateParam,
    ) -> Result<ShopDomain, BridgeError> {
        if query.code.is_empty() {
            return Err(BridgeError::Validation {
                reason: "missing 'code' parameter".to_string(),
            });
        }
        if query.shop.is_empty() {
            return Err(BridgeError::Validation {
                reason: "missing 'shop' parameter".to_string(),
            });
        }

        let (shop, _token) =
            validate_callback(&self.config, self.store.as_ref(), query, expected_state).await?;
        tracing::info!(shop = %shop, "shop authorized");
        Ok(shop)
    }

    /// Updates a customer.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotAuthenticated`] if no token is stored for
    /// the shop, and [`BridgeError::Upstream`] for classified upstream
    /// failures including `userErrors`.
    pub async fn update_customer(
        &self,
        shop: &str,
        input: &CustomerUpdate,
    ) -> Result<Customer, BridgeError> {
        let shop = parse_shop(shop)?;
        let token = self.token_for(&shop)?;
        let payload = self
            .mediator
            .execute(&shop, &token, &customer_update(input))
            .await?;
        extract(payload, "customer")
    }

    /// Creates a subscription contract, returning the draft it opens.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`update_customer`](Self::update_customer).
    pub async fn create_subscription_contract(
        &self,
        shop: &str,
        input: &SubscriptionContractCreate,
    ) -> Result<SubscriptionDraft, BridgeError> {
        let shop = parse_shop(shop)?;
        let token = self.token_for(&shop)?;
        let payload = self
            .mediator
            .execute(&shop, &token, &subscription_contract_create(input))
            .await?;
        extract(payload, "draft")
    }

    /// Opens a draft on an existing subscription contract.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`update_customer`](Self::update_customer).
    pub async fn open_contract_draft(
        &self,
        shop: &str,
        contract_id: &str,
    ) -> Result<SubscriptionDraft, BridgeError> {
        let shop = parse_shop(shop)?;
        let token = self.token_for(&shop)?;
        let payload = self
            .mediator
            .execute(&shop, &token, &subscription_contract_update(contract_id))
            .await?;
        extract(payload, "draft")
    }

    /// Adds a line to a contract by running the full draft chain: open a
    /// draft, add the line, commit.
    ///
    /// # Errors
    ///
    /// On a mid-chain failure the returned [`BridgeError::Upstream`] names
    /// the step that failed and the remaining steps are not attempted.
    pub async fn add_subscription_line(
        &self,
        shop: &str,
        contract_id: &str,
        line: &SubscriptionLine,
    ) -> Result<SubscriptionContract, BridgeError> {
        let shop = parse_shop(shop)?;
        let token = self.token_for(&shop)?;
        let contract =
            add_line_and_commit(&self.mediator, &shop, &token, contract_id, line).await?;
        Ok(contract)
    }

    /// Commits an open draft directly.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`update_customer`](Self::update_customer).
    pub async fn commit_draft(
        &self,
        shop: &str,
        draft_id: &str,
    ) -> Result<SubscriptionContract, BridgeError> {
        let shop = parse_shop(shop)?;
        let token = self.token_for(&shop)?;
        let payload = self
            .mediator
            .execute(&shop, &token, &subscription_draft_commit(draft_id))
            .await?;
        extract(payload, "contract")
    }

    fn token_for(&self, shop: &ShopDomain) -> Result<AccessToken, BridgeError> {
        self.store
            .get(shop)
            .ok_or_else(|| BridgeError::NotAuthenticated {
                shop: shop.to_string(),
            })
    }
}

fn parse_shop(shop: &str) -> Result<ShopDomain, BridgeError> {
    ShopDomain::new(shop).map_err(|e| BridgeError::Validation {
        reason: e.to_string(),
    })
}

fn extract<T: serde::de::DeserializeOwned>(payload: Value, field: &str) -> Result<T, BridgeError> {
    serde_json::from_value(payload[field].clone()).map_err(|e| {
        MediationError::Malformed {
            reason: format!("unreadable '{field}' payload: {e}"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::config::{ApiKey, ApiSecretKey};

    fn bridge() -> Bridge {
        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build()
            .unwrap();
        Bridge::new(config, Arc::new(MemoryTokenStore::new()))
    }

    #[tokio::test]
    async fn test_unknown_shop_is_not_authenticated() {
        let input = CustomerUpdate {
            id: "gid://shopify/Customer/1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            birthday: None,
            billing_address: None,
        };
        let err = bridge().update_customer("demo", &input).await.unwrap_err();
        assert!(matches!(err, BridgeError::NotAuthenticated { .. }));
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_malformed_shop_is_validation_error() {
        let err = bridge()
            .commit_draft("not a shop", "gid://shopify/SubscriptionDraft/1")
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Validation { .. }));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_callback_without_code_is_validation_error() {
        let query = CallbackQuery {
            code: String::new(),
            shop: "demo.myshopify.com".to_string(),
            state: "abc".to_string(),
            timestamp: "1700000000".to_string(),
            hmac: "00".to_string(),
            extra: std::collections::BTreeMap::new(),
        };
        let err = bridge()
            .complete_auth(&query, &StateParam::from_raw("abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Validation { .. }));
    }

    #[test]
    fn test_begin_auth_without_host_is_validation_error() {
        let err = bridge().begin_auth("demo", "/auth/callback").unwrap_err();
        assert!(matches!(err, BridgeError::Validation { .. }));
        assert_eq!(err.status_code(), 400);
    }
}
