//! Typed, injection-safe bridge between HTTP endpoint handlers and the
//! Shopify Admin API, covering the OAuth token lifecycle and the customer
//! and subscription-contract mutations.
//!
//! The crate has four layers:
//!
//! - [`auth`]: OAuth flow and per-shop credential storage
//! - [`graphql`]: the mediator every Admin API call flows through
//! - [`operations`]: typed request builders, one per mutation
//! - [`Bridge`]: the facade endpoint handlers call
//!
//! Every GraphQL document is a compile-time constant; caller input only
//! travels as bound variables. Every failure surfaces as a [`BridgeError`]
//! with a deterministic HTTP status mapping.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use subscription_bridge::{
//!     ApiKey, ApiSecretKey, Bridge, BridgeConfig, CustomerUpdate, MemoryTokenStore,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BridgeConfig::builder()
//!     .api_key(ApiKey::new("client-id")?)
//!     .api_secret_key(ApiSecretKey::new("client-secret")?)
//!     .scopes("write_customers,write_own_subscription_contracts".parse()?)
//!     .build()?;
//!
//! let bridge = Bridge::new(config, Arc::new(MemoryTokenStore::new()));
//!
//! let input = CustomerUpdate {
//!     id: "gid://shopify/Customer/123".to_string(),
//!     first_name: "Jane".to_string(),
//!     last_name: "Doe".to_string(),
//!     email: None,
//!     birthday: None,
//!     billing_address: None,
//! };
//! match bridge.update_customer("demo", &input).await {
//!     Ok(customer) => println!("updated {}", customer.id),
//!     Err(err) => eprintln!("status {}: {err}", err.status_code()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod bridge;
pub mod config;
mod error;
pub mod flows;
pub mod graphql;
pub mod operations;

pub use auth::oauth::{
    begin_auth, exchange_code, validate_callback, AuthorizeRedirect, CallbackQuery, OAuthError,
    StateParam,
};
pub use auth::{AccessToken, AuthScopes, MemoryTokenStore, TokenStore};
pub use bridge::Bridge;
pub use config::{
    ApiKey, ApiSecretKey, ApiVersion, BridgeConfig, BridgeConfigBuilder, HostUrl, ShopDomain,
};
pub use error::{BridgeError, ConfigError};
pub use flows::{add_line_and_commit, StepFailure, UpdateStep};
pub use graphql::{GraphqlMediator, GraphqlOperation, MediationError, UserError};
pub use operations::{
    customer_update, subscription_contract_create, subscription_contract_update,
    subscription_draft_commit, subscription_draft_line_add, CurrencyCode, Customer,
    CustomerUpdate, MailingAddress, PolicyInterval, SubscriptionContract,
    SubscriptionContractCreate, SubscriptionDraft, SubscriptionLine, SubscriptionPolicy,
};
