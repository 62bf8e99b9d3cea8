//! Authentication: OAuth scopes, the credential store, and the OAuth flow.
//!
//! - [`AuthScopes`]: the scope set requested during authorization
//! - [`AccessToken`] / [`TokenStore`] / [`MemoryTokenStore`]: per-shop
//!   credential storage with last-write-wins semantics
//! - [`oauth`]: authorization-URL generation, callback validation, and the
//!   authorization-code-for-access-token exchange

pub mod oauth;
mod scopes;
mod token_store;

pub use scopes::AuthScopes;
pub use token_store::{AccessToken, MemoryTokenStore, TokenStore};
