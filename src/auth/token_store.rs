//! Credential storage for OAuth access tokens.
//!
//! The store maps a shop domain to the access token obtained for it. The
//! contract is deliberately small: `put` overwrites (last-write-wins on
//! re-authorization), `get` returns the current token or nothing. The store
//! is injected as a trait object so a durable implementation can replace
//! [`MemoryTokenStore`] without touching callers.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::config::ShopDomain;

/// An opaque access token issued by the upstream OAuth endpoint.
///
/// The token authorizes Admin API calls on behalf of exactly one shop. It is
/// a secret: the `Debug` implementation redacts it and the type is not
/// serializable, so it cannot leak into logs or response bodies by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token string received from the upstream platform.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for use in the `X-Shopify-Access-Token` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// Per-shop credential storage.
///
/// Implementations must be safe for concurrent use: reads dominate, writes
/// happen only on OAuth callbacks.
pub trait TokenStore: Send + Sync {
    /// Stores the token for `shop`, overwriting any existing entry.
    fn put(&self, shop: &ShopDomain, token: AccessToken);

    /// Returns the stored token for `shop`, or `None` if the shop has not
    /// completed OAuth in this process's lifetime.
    fn get(&self, shop: &ShopDomain) -> Option<AccessToken>;
}

/// In-memory, process-lifetime token store.
///
/// Tokens live only as long as the process; a restart drops all credentials
/// and shops must re-authorize. That volatility is part of this store's
/// contract, not an oversight — swap in a durable [`TokenStore`]
/// implementation where persistence is needed.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, AccessToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn put(&self, shop: &ShopDomain, token: AccessToken) {
        let mut entries = self.entries.write().expect("token store lock poisoned");
        entries.insert(shop.as_ref().to_string(), token);
    }

    fn get(&self, shop: &ShopDomain) -> Option<AccessToken> {
        let entries = self.entries.read().expect("token store lock poisoned");
        entries.get(shop.as_ref()).cloned()
    }
}

// Verify the store is usable as a shared trait object at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemoryTokenStore>();
    assert_send_sync::<AccessToken>();
};
