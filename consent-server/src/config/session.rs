//! Session cookie configuration

use crate::config::ConfigError;
use axum_extra::extract::cookie::Key;
use confique::Config;
use sha2::{Digest, Sha512};

/// Minimum length of the session secret in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Settings for the signed cookie that remembers the logged-in subject
#[derive(Debug, Config, Clone)]
pub struct SessionConfig {
    /// Secret used to sign the session cookie, at least 32 bytes (required)
    #[config(env = "CONSENT_SESSION_SECRET")]
    pub secret: String,

    /// Name of the session cookie (default: consent_session)
    #[config(env = "CONSENT_SESSION_COOKIE_NAME", default = "consent_session")]
    pub cookie_name: String,

    /// Only send the session cookie over HTTPS (default: false)
    #[config(env = "CONSENT_SESSION_SECURE", default = false)]
    pub secure: bool,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Validation(format!(
                "session.secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if self.cookie_name.is_empty() {
            return Err(ConfigError::Validation(
                "session.cookie_name must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Derive the 64-byte cookie signing key from the configured secret
    pub fn cookie_key(&self) -> Key {
        let digest = Sha512::digest(self.secret.as_bytes());
        Key::from(digest.as_slice())
    }
}
