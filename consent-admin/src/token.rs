//! Client-credentials token fetching for the consent API

use crate::client::ConsentAdminClient;
use crate::error::AdminError;
use log::{debug, error, info, warn};
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::{
    AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RequestTokenError, Scope,
    TokenResponse, TokenUrl,
};
use reqwest::{redirect, Client};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Scope granting management access to consent requests
pub const DEFAULT_CONSENT_SCOPE: &str = "hydra.consent";

/// How the client authenticates itself at the token endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientAuthMethod {
    /// HTTP Basic with `client_id`/`client_secret`
    #[default]
    ClientSecretBasic,
    /// `client_id`/`client_secret` as form body parameters
    ClientSecretPost,
}

impl FromStr for ClientAuthMethod {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "client_secret_basic" | "basic" => Ok(Self::ClientSecretBasic),
            "client_secret_post" | "post" => Ok(Self::ClientSecretPost),
            other => Err(AdminError::InvalidConfig(format!(
                "unsupported client authentication method '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenProviderOptions {
    /// Scope requested for every token (default: hydra.consent)
    pub scope: String,
    /// Client authentication at the token endpoint (default: HTTP Basic)
    pub client_auth: ClientAuthMethod,
    /// Timeout for the token request (default: 1 s)
    pub timeout: Duration,
    /// Skip TLS certificate verification on the token request (default: false)
    pub accept_invalid_certs: bool,
}

impl Default for TokenProviderOptions {
    fn default() -> Self {
        Self {
            scope: DEFAULT_CONSENT_SCOPE.to_string(),
            client_auth: ClientAuthMethod::default(),
            timeout: Duration::from_secs(1),
            accept_invalid_certs: false,
        }
    }
}

type TokenClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

impl ClientAuthMethod {
    fn auth_type(self) -> AuthType {
        match self {
            ClientAuthMethod::ClientSecretBasic => AuthType::BasicAuth,
            ClientAuthMethod::ClientSecretPost => AuthType::RequestBody,
        }
    }
}

/// Exchanges static client credentials for an access token and builds
/// authenticated [`ConsentAdminClient`]s from it.
#[derive(Clone)]
pub struct TokenProvider {
    http: Client,
    oauth: TokenClient,
    client_id: String,
    token_url: Url,
    consent_endpoint: Url,
    options: TokenProviderOptions,
}

impl TokenProvider {
    /// Create a provider.
    ///
    /// # Arguments
    /// * `client_id` - OAuth 2.0 client identifier.
    /// * `client_secret` - Secret of that client.
    /// * `token_url` - The token endpoint.
    /// * `consent_endpoint` - Base URL of the consent API, consent ids are appended to it.
    /// * `options` - Scope, client authentication, timeout and TLS settings.
    pub fn with_options(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: &str,
        consent_endpoint: &str,
        options: TokenProviderOptions,
    ) -> Result<Self, AdminError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.is_empty() {
            return Err(AdminError::InvalidConfig(
                "client id must not be empty".to_string(),
            ));
        }
        if client_secret.is_empty() {
            return Err(AdminError::InvalidConfig(
                "client secret must not be empty".to_string(),
            ));
        }
        if token_url.is_empty() {
            return Err(AdminError::InvalidConfig(
                "token endpoint must not be empty".to_string(),
            ));
        }

        let token_url = parse_url(token_url)?;
        let consent_endpoint = parse_url(consent_endpoint)?;
        if consent_endpoint.cannot_be_a_base() {
            return Err(AdminError::NotABaseUrl(consent_endpoint.to_string()));
        }

        if options.accept_invalid_certs {
            warn!(
                "TLS certificate verification is DISABLED for token requests to {}",
                token_url
            );
        }

        // Token endpoints answer directly, a redirect is never followed
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()?;

        let oauth = BasicClient::new(ClientId::new(client_id.clone()))
            .set_client_secret(ClientSecret::new(client_secret))
            .set_token_uri(TokenUrl::from_url(token_url.clone()))
            .set_auth_type(options.client_auth.auth_type());

        Ok(Self {
            http,
            oauth,
            client_id,
            token_url,
            consent_endpoint,
            options,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn consent_endpoint(&self) -> &Url {
        &self.consent_endpoint
    }

    /// Perform the client-credentials grant.
    ///
    /// A single attempt is made. Transport failures and error responses of the token
    /// endpoint are returned as errors.
    pub async fn fetch_token(&self) -> Result<BasicTokenResponse, AdminError> {
        debug!(
            "Requesting access token from {} for client '{}'",
            self.token_url, self.client_id
        );

        let token = self
            .oauth
            .exchange_client_credentials()
            .add_scope(Scope::new(self.options.scope.clone()))
            .request_async(&self.http)
            .await
            .map_err(|err| {
                match &err {
                    RequestTokenError::ServerResponse(response) => error!(
                        "Token endpoint rejected client '{}': {}",
                        self.client_id, response
                    ),
                    other => error!("Token request to {} failed: {}", self.token_url, other),
                }
                AdminError::from(err)
            })?;

        info!(
            "Fetched {} access token for client '{}' (scope: {}, expires in: {})",
            token.token_type().as_ref(),
            self.client_id,
            token
                .scopes()
                .map(|scopes| scopes
                    .iter()
                    .map(|scope| scope.as_str())
                    .collect::<Vec<_>>()
                    .join(" "))
                .unwrap_or_else(|| self.options.scope.clone()),
            token
                .expires_in()
                .map(|ttl| format!("{}s", ttl.as_secs()))
                .unwrap_or_else(|| "unknown".to_string())
        );

        Ok(token)
    }

    /// Fetch a fresh token and wrap it in a client for the consent API
    pub async fn admin_client(&self) -> Result<ConsentAdminClient, AdminError> {
        let token = self.fetch_token().await?;
        ConsentAdminClient::with_token(token.access_token(), self.consent_endpoint.clone())
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url.as_str())
            .field("consent_endpoint", &self.consent_endpoint.as_str())
            .field("options", &self.options)
            .finish()
    }
}

fn parse_url(raw: &str) -> Result<Url, AdminError> {
    Url::parse(raw).map_err(|source| AdminError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
