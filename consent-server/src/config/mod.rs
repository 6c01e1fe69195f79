pub(crate) use crate::config::admin::AdminConfig;
pub(crate) use crate::config::oauth::OAuthConfig;
pub(crate) use crate::config::session::SessionConfig;
use confique::Config;
use thiserror::Error;

pub mod admin;
pub mod oauth;
pub mod session;

/// Optional configuration file, environment variables take precedence over it
pub const CONFIG_FILE: &str = "consent.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] confique::Error),
    #[error("Invalid configuration: {0}")]
    Validation(String),
    #[error(transparent)]
    Admin(#[from] consent_admin::AdminError),
}

/// Main configuration structure for the consent server
#[derive(Debug, Config, Clone)]
pub struct ConsentConfig {
    /// The port the consent server will listen to (default: 3000)
    #[config(env = "CONSENT_PORT", default = 3000)]
    pub port: u16,

    /// Client-credentials settings for the token endpoint
    #[config(nested)]
    pub oauth: OAuthConfig,

    /// Consent administrative API settings
    #[config(nested)]
    pub admin: AdminConfig,

    /// Session cookie settings
    #[config(nested)]
    pub session: SessionConfig,
}

impl ConsentConfig {
    /// Creates a new configuration from environment variables and the optional config file
    pub fn new() -> Result<Self, ConfigError> {
        let config = Self::builder().env().file(CONFIG_FILE).load()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values confique cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.oauth.validate()?;
        self.admin.validate()?;
        self.session.validate()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(
        token_mock: &wiremock::MockServer,
        admin_mock: &wiremock::MockServer,
    ) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            oauth: OAuthConfig {
                client_id: "consent-app".to_string(),
                client_secret: "consent-secret".to_string(),
                token_url: format!("{}/oauth2/token", token_mock.uri()),
                scope: consent_admin::DEFAULT_CONSENT_SCOPE.to_string(),
                client_auth: "client_secret_basic".to_string(),
                timeout: 1,
                insecure_skip_verify: false,
            },
            admin: AdminConfig {
                consent_endpoint: format!("{}/oauth2/consent/requests/", admin_mock.uri()),
            },
            session: SessionConfig {
                secret: "test-session-secret-that-is-long-enough".to_string(),
                cookie_name: "consent_session".to_string(),
                secure: false,
            },
        }
    }
}
