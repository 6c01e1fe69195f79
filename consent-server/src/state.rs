use crate::config::{ConfigError, ConsentConfig};
use crate::session::SessionCookie;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use consent_admin::TokenProvider;
use log::info;
use std::sync::Arc;

/// Immutable state shared by all handlers, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub token_provider: Arc<TokenProvider>,
    pub session: Arc<SessionCookie>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(config: ConsentConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let token_provider = TokenProvider::with_options(
            config.oauth.client_id.clone(),
            config.oauth.client_secret.clone(),
            &config.oauth.token_url,
            &config.admin.consent_endpoint,
            config.oauth.token_provider_options()?,
        )?;

        let session = SessionCookie::new(
            config.session.cookie_name.clone(),
            config.session.secure,
        );
        let cookie_key = config.session.cookie_key();

        info!(
            "Relaying consent decisions to {} as client '{}'",
            token_provider.consent_endpoint(),
            token_provider.client_id()
        );

        Ok(Self {
            token_provider: Arc::new(token_provider),
            session: Arc::new(session),
            cookie_key,
        })
    }
}

// Lets `SignedCookieJar` find its signing key in the state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
