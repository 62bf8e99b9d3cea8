//! Authorization-code exchange.

use serde::{Deserialize, Serialize};

use crate::auth::{AccessToken, TokenStore};
use crate::config::{BridgeConfig, ShopDomain};

use super::error::OAuthError;

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    scope: Option<String>,
}

/// Exchanges an authorization code for an access token and stores it.
///
/// Posts the client credentials and code to the shop's token endpoint. On
/// success the token is written to `store` under the shop's full domain,
/// overwriting any previous token for that shop, and returned to the
/// caller. The token itself is never logged.
///
/// # Errors
///
/// - [`OAuthError::Network`] if the request fails before a response arrives
/// - [`OAuthError::ExchangeFailed`] on any non-200 status
/// - [`OAuthError::MalformedTokenResponse`] if the 200 body has no usable
///   `access_token`
pub async fn exchange_code(
    config: &BridgeConfig,
    store: &dyn TokenStore,
    shop: &ShopDomain,
    code: &str,
) -> Result<AccessToken, OAuthError> {
    let url = format!("{}/admin/oauth/access_token", config.upstream_base(shop));
    let request = TokenRequest {
        client_id: config.api_key().as_ref(),
        client_secret: config.api_secret_key().as_ref(),
        code,
    };

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()?;
    let response = client.post(&url).json(&request).send().await?;

    let status = response.status().as_u16();
    if status != 200 {
        let body = response.text().await.unwrap_or_default();
        return Err(OAuthError::ExchangeFailed { status, body });
    }

    let body = response.text().await?;
    let parsed: TokenResponse =
        serde_json::from_str(&body).map_err(|e| OAuthError::MalformedTokenResponse {
            reason: e.to_string(),
        })?;
    if parsed.access_token.is_empty() {
        return Err(OAuthError::MalformedTokenResponse {
            reason: "empty access_token".to_string(),
        });
    }

    let token = AccessToken::new(parsed.access_token);
    store.put(shop, token.clone());

    tracing::debug!(
        shop = %shop,
        scope = parsed.scope.as_deref().unwrap_or(""),
        "access token stored"
    );

    Ok(token)
}
