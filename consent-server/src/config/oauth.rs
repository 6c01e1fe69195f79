//! OAuth 2.0 client-credentials configuration

use crate::config::ConfigError;
use confique::Config;
use consent_admin::{ClientAuthMethod, TokenProviderOptions};
use std::time::Duration;
use url::Url;

/// Credentials and settings used to obtain tokens for the consent API
#[derive(Debug, Config, Clone)]
pub struct OAuthConfig {
    /// OAuth 2.0 client identifier (required)
    #[config(env = "CONSENT_OAUTH_CLIENT_ID")]
    pub client_id: String,

    /// OAuth 2.0 client secret (required)
    #[config(env = "CONSENT_OAUTH_CLIENT_SECRET")]
    pub client_secret: String,

    /// Token endpoint of the authorization server (required)
    #[config(env = "CONSENT_OAUTH_TOKEN_URL")]
    pub token_url: String,

    /// Scope requested for the consent API token (default: hydra.consent)
    #[config(env = "CONSENT_OAUTH_SCOPE", default = "hydra.consent")]
    pub scope: String,

    /// Client authentication: "client_secret_basic" or "client_secret_post"
    /// (default: client_secret_basic)
    #[config(env = "CONSENT_OAUTH_CLIENT_AUTH", default = "client_secret_basic")]
    pub client_auth: String,

    /// Token request timeout in seconds (default: 1)
    #[config(env = "CONSENT_OAUTH_TIMEOUT", default = 1)]
    pub timeout: u64,

    /// Skip TLS certificate verification for the token request (default: false)
    #[config(env = "CONSENT_OAUTH_INSECURE_SKIP_VERIFY", default = false)]
    pub insecure_skip_verify: bool,
}

impl OAuthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.is_empty() {
            return Err(ConfigError::Validation(
                "oauth.client_id must not be empty".into(),
            ));
        }
        if self.client_secret.is_empty() {
            return Err(ConfigError::Validation(
                "oauth.client_secret must not be empty".into(),
            ));
        }
        Url::parse(&self.token_url).map_err(|e| {
            ConfigError::Validation(format!("oauth.token_url is not a valid URL: {e}"))
        })?;
        self.client_auth_method()?;
        Ok(())
    }

    pub fn client_auth_method(&self) -> Result<ClientAuthMethod, ConfigError> {
        Ok(self.client_auth.parse::<ClientAuthMethod>()?)
    }

    /// Options for the token provider built from this configuration
    pub fn token_provider_options(&self) -> Result<TokenProviderOptions, ConfigError> {
        Ok(TokenProviderOptions {
            scope: self.scope.clone(),
            client_auth: self.client_auth_method()?,
            timeout: Duration::from_secs(self.timeout),
            accept_invalid_certs: self.insecure_skip_verify,
        })
    }
}
