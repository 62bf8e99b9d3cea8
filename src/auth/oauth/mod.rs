//! The OAuth authorization-code flow.
//!
//! Three steps, in order:
//!
//! 1. [`begin_auth`] builds the authorize URL and a CSRF [`StateParam`]
//! 2. [`validate_callback`] verifies the callback's HMAC signature and
//!    state, then calls [`exchange_code`]
//! 3. [`exchange_code`] trades the authorization code for an access token
//!    and writes it to the [`TokenStore`](crate::auth::TokenStore)

mod authorize;
mod callback;
mod error;
mod exchange;
mod state;

pub use authorize::{begin_auth, AuthorizeRedirect};
pub use callback::{compute_signature, validate_callback, CallbackQuery};
pub use error::OAuthError;
pub use exchange::exchange_code;
pub use state::StateParam;
