//! Validated newtype wrappers for configuration values.
//!
//! Every wrapper validates on construction so the rest of the crate can
//! assume its invariants. Secret-bearing types redact their `Debug` output.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A validated Shopify API key (the OAuth client id).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Shopify API secret key (the OAuth client secret).
///
/// The `Debug` implementation prints `ApiSecretKey(*****)` so the secret
/// never ends up in diagnostic output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecretKey(String);

impl ApiSecretKey {
    /// Creates a new validated API secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiSecretKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiSecretKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiSecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecretKey(*****)")
    }
}

/// A validated, normalized shop domain.
///
/// Accepts either `shop-name` (normalized to `shop-name.myshopify.com`) or
/// the full `shop-name.myshopify.com` form. The full domain is the sole key
/// into the credential store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShopDomain(String);

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is empty,
    /// carries a foreign suffix, or contains invalid characters.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into().trim().to_lowercase();
        if domain.is_empty() {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        let full = if let Some(name) = domain.strip_suffix(Self::SUFFIX) {
            if !Self::valid_shop_name(name) {
                return Err(ConfigError::InvalidShopDomain { domain });
            }
            domain
        } else if Self::valid_shop_name(&domain) {
            format!("{domain}{}", Self::SUFFIX)
        } else {
            return Err(ConfigError::InvalidShopDomain { domain });
        };

        Ok(Self(full))
    }

    /// Returns the shop name portion, e.g. `demo` for `demo.myshopify.com`.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        self.0.strip_suffix(Self::SUFFIX).unwrap_or(&self.0)
    }

    fn valid_shop_name(name: &str) -> bool {
        !name.is_empty()
            && !name.starts_with('-')
            && !name.ends_with('-')
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated host URL.
///
/// Used for the bridge's own host (the redirect-URI base) and for the
/// optional upstream override used in proxy and test scenarios. Trailing
/// slashes are trimmed so the value can be concatenated with paths directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl(String);

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL has no scheme or
    /// no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();

        let Some(scheme_end) = url.find("://") else {
            return Err(ConfigError::InvalidHostUrl { url });
        };
        let scheme = &url[..scheme_end];
        let host = &url[scheme_end + 3..];
        if scheme.is_empty()
            || !scheme.chars().all(|c| c.is_ascii_alphabetic())
            || host.is_empty()
        {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        Ok(Self(url))
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_secret_key_masks_value_in_debug() {
        let secret = ApiSecretKey::new("super-secret").unwrap();
        let out = format!("{secret:?}");
        assert_eq!(out, "ApiSecretKey(*****)");
        assert!(!out.contains("super-secret"));
    }

    #[test]
    fn test_shop_domain_normalizes_short_form() {
        let shop = ShopDomain::new("demo").unwrap();
        assert_eq!(shop.as_ref(), "demo.myshopify.com");
        assert_eq!(shop.shop_name(), "demo");
    }

    #[test]
    fn test_shop_domain_accepts_full_form() {
        let shop = ShopDomain::new("demo.myshopify.com").unwrap();
        assert_eq!(shop.as_ref(), "demo.myshopify.com");
    }

    #[test]
    fn test_shop_domain_rejects_invalid() {
        assert!(ShopDomain::new("").is_err());
        assert!(ShopDomain::new("my shop").is_err());
        assert!(ShopDomain::new("my_shop").is_err());
        assert!(ShopDomain::new("-shop").is_err());
        assert!(ShopDomain::new("shop-").is_err());
        assert!(ShopDomain::new("shop.example.com").is_err());
        // uppercase is normalized, not rejected
        assert!(ShopDomain::new("DEMO").is_ok());
    }

    #[test]
    fn test_shop_domain_serde_round_trip() {
        let shop = ShopDomain::new("demo").unwrap();
        let json = serde_json::to_string(&shop).unwrap();
        assert_eq!(json, r#""demo.myshopify.com""#);
        let back: ShopDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shop);
    }

    #[test]
    fn test_host_url_trims_trailing_slash() {
        let host = HostUrl::new("https://bridge.example.com/").unwrap();
        assert_eq!(host.as_ref(), "https://bridge.example.com");
    }

    #[test]
    fn test_host_url_accepts_port() {
        let host = HostUrl::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(host.as_ref(), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_host_url_rejects_invalid() {
        assert!(HostUrl::new("bridge.example.com").is_err());
        assert!(HostUrl::new("https://").is_err());
        assert!(HostUrl::new("://example.com").is_err());
    }
}
