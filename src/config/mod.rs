//! Bridge configuration.
//!
//! [`BridgeConfig`] holds the process-wide settings loaded once at startup:
//! OAuth client credentials, the bridge's own host (for redirect URIs),
//! requested scopes, the Admin API version, and the outbound request
//! timeout. Construction goes through [`BridgeConfigBuilder`] so required
//! fields are checked up front.
//!
//! # Example
//!
//! ```rust
//! use subscription_bridge::{ApiKey, ApiSecretKey, ApiVersion, BridgeConfig};
//!
//! let config = BridgeConfig::builder()
//!     .api_key(ApiKey::new("client-id").unwrap())
//!     .api_secret_key(ApiSecretKey::new("client-secret").unwrap())
//!     .scopes("write_customers,write_own_subscription_contracts".parse().unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version(), &ApiVersion::latest());
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, ApiSecretKey, HostUrl, ShopDomain};
pub use version::ApiVersion;

use std::time::Duration;

use crate::auth::AuthScopes;
use crate::error::ConfigError;

/// Default timeout applied to every outbound HTTP call.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Process-wide configuration for the bridge.
///
/// `BridgeConfig` is `Clone + Send + Sync`; pass it by reference into the
/// OAuth functions and the GraphQL mediator.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
    scopes: AuthScopes,
    host: Option<HostUrl>,
    upstream_host: Option<HostUrl>,
    api_version: ApiVersion,
    request_timeout: Duration,
}

impl BridgeConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }

    /// Returns the OAuth client id.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the OAuth client secret.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// Returns the OAuth scopes requested during authorization.
    #[must_use]
    pub const fn scopes(&self) -> &AuthScopes {
        &self.scopes
    }

    /// Returns the bridge's own host, used as the redirect-URI base.
    #[must_use]
    pub const fn host(&self) -> Option<&HostUrl> {
        self.host.as_ref()
    }

    /// Returns the upstream host override, if configured.
    ///
    /// When set, OAuth token exchange and GraphQL calls go to this base URL
    /// instead of `https://{shop}` (proxy and test scenarios).
    #[must_use]
    pub const fn upstream_host(&self) -> Option<&HostUrl> {
        self.upstream_host.as_ref()
    }

    /// Returns the Admin API version used for GraphQL calls.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the timeout applied to every outbound call.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the base URL for upstream calls to the given shop.
    pub(crate) fn upstream_base(&self, shop: &ShopDomain) -> String {
        self.upstream_host.as_ref().map_or_else(
            || format!("https://{}", shop.as_ref()),
            |host| host.as_ref().to_string(),
        )
    }
}

// Verify BridgeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BridgeConfig>();
};

/// Builder for [`BridgeConfig`].
///
/// Required fields are `api_key` and `api_secret_key`; everything else has
/// defaults (empty scopes, no hosts, latest API version, 10s timeout).
#[derive(Debug, Default)]
pub struct BridgeConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    scopes: Option<AuthScopes>,
    host: Option<HostUrl>,
    upstream_host: Option<HostUrl>,
    api_version: Option<ApiVersion>,
    request_timeout: Option<Duration>,
}

impl BridgeConfigBuilder {
    /// Sets the OAuth client id (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the OAuth client secret (required).
    #[must_use]
    pub fn api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(key);
        self
    }

    /// Sets the OAuth scopes to request.
    #[must_use]
    pub fn scopes(mut self, scopes: AuthScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the bridge's own host (redirect-URI base).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets an upstream base-URL override for all outbound calls.
    #[must_use]
    pub fn upstream_host(mut self, host: HostUrl) -> Self {
        self.upstream_host = Some(host);
        self
    }

    /// Sets the Admin API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the outbound request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `api_secret_key` was never set.
    pub fn build(self) -> Result<BridgeConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret_key = self
            .api_secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret_key",
            })?;

        Ok(BridgeConfig {
            api_key,
            api_secret_key,
            scopes: self.scopes.unwrap_or_default(),
            host: self.host,
            upstream_host: self.upstream_host,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_credentials() {
        let result = BridgeConfig::builder()
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));

        let result = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "api_secret_key"
            })
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.scopes().is_empty());
        assert!(config.host().is_none());
        assert!(config.upstream_host().is_none());
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_upstream_base_defaults_to_shop_domain() {
        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build()
            .unwrap();

        let shop = ShopDomain::new("demo").unwrap();
        assert_eq!(config.upstream_base(&shop), "https://demo.myshopify.com");
    }

    #[test]
    fn test_upstream_base_honors_override() {
        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .upstream_host(HostUrl::new("http://127.0.0.1:8080").unwrap())
            .build()
            .unwrap();

        let shop = ShopDomain::new("demo").unwrap();
        assert_eq!(config.upstream_base(&shop), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_debug_masks_secret() {
        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
    }
}
