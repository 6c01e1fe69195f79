use crate::config::ConfigError;
use confique::Config;
use url::Url;

/// Configuration for the consent administrative API
#[derive(Debug, Config, Clone)]
pub struct AdminConfig {
    /// Base URL of the consent requests resource, e.g.
    /// `https://idp.example.com/oauth2/consent/requests/` (required)
    #[config(env = "CONSENT_ADMIN_CONSENT_ENDPOINT")]
    pub consent_endpoint: String,
}

impl AdminConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.consent_endpoint).map_err(|e| {
            ConfigError::Validation(format!("admin.consent_endpoint is not a valid URL: {e}"))
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::Validation(
                "admin.consent_endpoint cannot be used as a base URL".into(),
            ));
        }
        Ok(())
    }
}
