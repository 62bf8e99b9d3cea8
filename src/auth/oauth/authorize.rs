//! Authorization-URL generation.

use crate::config::{BridgeConfig, ShopDomain};

use super::error::OAuthError;
use super::state::StateParam;

/// The outcome of starting an OAuth flow: where to send the merchant, and
/// the state the caller must retain to validate the callback.
#[derive(Clone, Debug)]
pub struct AuthorizeRedirect {
    /// The fully-built authorize URL on the shop's domain.
    pub auth_url: String,
    /// The CSRF state embedded in `auth_url`. Keep it to pass into
    /// [`validate_callback`](super::validate_callback).
    pub state: StateParam,
}

/// Builds the authorize URL that starts the OAuth flow for `shop`.
///
/// The redirect URI is `{config.host}{redirect_path}`, so the bridge host
/// must be configured.
///
/// # Errors
///
/// Returns [`OAuthError::MissingHostConfig`] if no host is set.
pub fn begin_auth(
    config: &BridgeConfig,
    shop: &ShopDomain,
    redirect_path: &str,
) -> Result<AuthorizeRedirect, OAuthError> {
    let host = config.host().ok_or(OAuthError::MissingHostConfig)?;
    let redirect_uri = format!("{}{redirect_path}", host.as_ref());
    let state = StateParam::new();

    let auth_url = format!(
        "https://{}/admin/oauth/authorize?client_id={}&scope={}&redirect_uri={}&state={}",
        shop.as_ref(),
        urlencoding::encode(config.api_key().as_ref()),
        urlencoding::encode(&config.scopes().to_string()),
        urlencoding::encode(&redirect_uri),
        state,
    );

    tracing::debug!(shop = %shop, "built authorize redirect");

    Ok(AuthorizeRedirect { auth_url, state })
}
