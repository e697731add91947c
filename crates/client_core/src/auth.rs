//! Credential handling and the HTTP Basic proof derived from it.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroize;

const BASIC_SCHEME: &str = "Basic ";

/// Username and password as typed by the user. Wiped when dropped.
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Builds the `Authorization` value for these credentials.
    pub fn to_proof(&self) -> AuthProof {
        let mut joined = format!("{}:{}", self.username, self.password);
        let encoded = STANDARD.encode(joined.as_bytes());
        joined.zeroize();
        AuthProof {
            header_value: format!("{BASIC_SCHEME}{encoded}"),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.username.zeroize();
        self.password.zeroize();
    }
}

/// `Basic <base64(username:password)>`, sent as the `Authorization` header.
///
/// Deliberately has no `Display`; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthProof {
    header_value: String,
}

impl AuthProof {
    pub fn header_value(&self) -> &str {
        &self.header_value
    }

    /// Recovers the `username:password` text the proof was built from.
    pub fn decode(&self) -> Option<String> {
        let encoded = self.header_value.strip_prefix(BASIC_SCHEME)?;
        let bytes = STANDARD.decode(encoded).ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl fmt::Debug for AuthProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthProof(<redacted>)")
    }
}

impl Drop for AuthProof {
    fn drop(&mut self) {
        self.header_value.zeroize();
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
