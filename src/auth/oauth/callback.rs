//! OAuth callback validation.
//!
//! Every callback is checked before the authorization code is exchanged:
//! the HMAC-SHA256 signature over the query parameters must verify against
//! the client secret, and the `state` parameter must match the value
//! generated when the flow began. Both comparisons are constant-time.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::auth::{AccessToken, TokenStore};
use crate::config::{ApiSecretKey, BridgeConfig, ShopDomain};

use super::error::OAuthError;
use super::exchange::exchange_code;
use super::state::StateParam;

type HmacSha256 = Hmac<Sha256>;

/// The query parameters Shopify appends to the redirect URI.
///
/// Parameters beyond the named ones (`host`, `locale`, and whatever the
/// platform adds next) land in `extra`; the signature covers them too, so
/// they must be captured rather than discarded.
#[derive(Clone, Debug, Deserialize)]
pub struct CallbackQuery {
    /// The authorization code to exchange for an access token.
    pub code: String,
    /// The shop the merchant authorized.
    pub shop: String,
    /// The CSRF state echoed back from the authorize URL.
    pub state: String,
    /// Unix timestamp of the redirect.
    pub timestamp: String,
    /// HMAC-SHA256 signature over every other parameter.
    pub hmac: String,
    /// Any further query parameters the callback carried.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl CallbackQuery {
    /// Returns the message the signature covers: all parameters except
    /// `hmac`, sorted by key and joined as a query string.
    #[must_use]
    pub fn signable_message(&self) -> String {
        let mut params: BTreeMap<&str, &str> = self
            .extra
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        params.insert("code", &self.code);
        params.insert("shop", &self.shop);
        params.insert("state", &self.state);
        params.insert("timestamp", &self.timestamp);
        params.remove("hmac");

        params
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Computes the hex-encoded HMAC-SHA256 signature of `message` under the
/// client secret.
#[must_use]
pub fn compute_signature(message: &str, secret: &ApiSecretKey) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_ref().as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn verify_signature(query: &CallbackQuery, secret: &ApiSecretKey) -> Result<(), OAuthError> {
    let expected = compute_signature(&query.signable_message(), secret);
    let matches: bool = expected
        .as_bytes()
        .ct_eq(query.hmac.to_lowercase().as_bytes())
        .into();
    if matches {
        Ok(())
    } else {
        Err(OAuthError::InvalidSignature)
    }
}

/// Validates an OAuth callback and exchanges its code for an access token.
///
/// On success the token is written to `store` and returned along with the
/// validated shop domain. The order of checks matters: the signature is
/// verified before anything else is trusted, then the state, then the shop
/// domain, and only then does the exchange go out.
///
/// # Errors
///
/// - [`OAuthError::InvalidSignature`] if the HMAC does not verify
/// - [`OAuthError::StateMismatch`] if the state differs from `expected_state`
/// - [`OAuthError::InvalidCallback`] if the shop domain is malformed
/// - any error from [`exchange_code`]
pub async fn validate_callback(
    config: &BridgeConfig,
    store: &dyn TokenStore,
    query: &CallbackQuery,
    expected_state: &StateParam,
) -> Result<(ShopDomain, AccessToken), OAuthError> {
    verify_signature(query, config.api_secret_key())?;

    if !expected_state.matches(&query.state) {
        return Err(OAuthError::StateMismatch {
            expected: expected_state.to_string(),
            received: query.state.clone(),
        });
    }

    let shop = ShopDomain::new(&query.shop).map_err(|e| OAuthError::InvalidCallback {
        reason: e.to_string(),
    })?;

    let token = exchange_code(config, store, &shop, &query.code).await?;
    Ok((shop, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> ApiSecretKey {
        ApiSecretKey::new("hush").unwrap()
    }

    fn signed_query(secret: &ApiSecretKey) -> CallbackQuery {
        let mut query = CallbackQuery {
            code: "code123".to_string(),
            shop: "demo.myshopify.com".to_string(),
            state: "state456".to_string(),
            timestamp: "1700000000".to_string(),
            hmac: String::new(),
            extra: BTreeMap::new(),
        };
        query.hmac = compute_signature(&query.signable_message(), secret);
        query
    }

    #[test]
    fn test_signable_message_excludes_hmac_and_sorts_keys() {
        let query = signed_query(&secret());
        assert_eq!(
            query.signable_message(),
            "code=code123&shop=demo.myshopify.com&state=state456&timestamp=1700000000"
        );
    }

    #[test]
    fn test_signable_message_includes_extra_parameters_sorted() {
        let mut query = signed_query(&secret());
        query
            .extra
            .insert("host".to_string(), "aG9zdC12YWx1ZQ".to_string());
        query
            .extra
            .insert("locale".to_string(), "en".to_string());
        assert_eq!(
            query.signable_message(),
            "code=code123&host=aG9zdC12YWx1ZQ&locale=en&shop=demo.myshopify.com\
             &state=state456&timestamp=1700000000"
        );
    }

    #[test]
    fn test_callback_with_host_parameter_verifies() {
        let secret = secret();
        let mut query = CallbackQuery {
            code: "code123".to_string(),
            shop: "demo.myshopify.com".to_string(),
            state: "state456".to_string(),
            timestamp: "1700000000".to_string(),
            hmac: String::new(),
            extra: BTreeMap::from([("host".to_string(), "aG9zdC12YWx1ZQ".to_string())]),
        };
        query.hmac = compute_signature(&query.signable_message(), &secret);
        assert!(verify_signature(&query, &secret).is_ok());
    }

    #[test]
    fn test_tampered_extra_parameter_fails_verification() {
        let secret = secret();
        let mut query = CallbackQuery {
            code: "code123".to_string(),
            shop: "demo.myshopify.com".to_string(),
            state: "state456".to_string(),
            timestamp: "1700000000".to_string(),
            hmac: String::new(),
            extra: BTreeMap::from([("host".to_string(), "aG9zdC12YWx1ZQ".to_string())]),
        };
        query.hmac = compute_signature(&query.signable_message(), &secret);
        query
            .extra
            .insert("host".to_string(), "dGFtcGVyZWQ".to_string());
        assert!(matches!(
            verify_signature(&query, &secret),
            Err(OAuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_deserializes_unknown_parameters_into_extra() {
        let query: CallbackQuery = serde_json::from_str(
            r#"{
                "code": "code123",
                "shop": "demo.myshopify.com",
                "state": "state456",
                "timestamp": "1700000000",
                "hmac": "00",
                "host": "aG9zdC12YWx1ZQ"
            }"#,
        )
        .unwrap();
        assert_eq!(query.extra.get("host").map(String::as_str), Some("aG9zdC12YWx1ZQ"));
    }

    #[test]
    fn test_valid_signature_verifies() {
        let query = signed_query(&secret());
        assert!(verify_signature(&query, &secret()).is_ok());
    }

    #[test]
    fn test_tampered_parameter_fails_verification() {
        let mut query = signed_query(&secret());
        query.shop = "evil.myshopify.com".to_string();
        assert!(matches!(
            verify_signature(&query, &secret()),
            Err(OAuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_signature_under_wrong_secret_fails() {
        let query = signed_query(&secret());
        let other = ApiSecretKey::new("different").unwrap();
        assert!(matches!(
            verify_signature(&query, &other),
            Err(OAuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_uppercase_hex_signature_verifies() {
        let mut query = signed_query(&secret());
        query.hmac = query.hmac.to_uppercase();
        assert!(verify_signature(&query, &secret()).is_ok());
    }
}
