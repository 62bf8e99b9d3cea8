//! CSRF state parameter for the OAuth flow.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use subtle::ConstantTimeEq;

/// Length of a generated state parameter.
const STATE_LENGTH: usize = 15;

/// A nonce carried through the OAuth round trip to bind the callback to the
/// authorization request that started it.
///
/// Generated when the authorize URL is built, then compared (in constant
/// time) against the `state` query parameter the callback carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam(String);

impl StateParam {
    /// Generates a fresh random state parameter.
    #[must_use]
    pub fn new() -> Self {
        let value: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_LENGTH)
            .map(char::from)
            .collect();
        Self(value)
    }

    /// Wraps a state value received back from the callback.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Compares against a received state value in constant time.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        self.0.as_bytes().ct_eq(received.as_bytes()).into()
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
