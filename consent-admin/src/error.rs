use oauth2::basic::BasicRequestTokenError;
use oauth2::{HttpClientError, RequestTokenError};
use reqwest::StatusCode;
use thiserror::Error;

/// Failure of the client-credentials exchange as reported by `oauth2`
pub type TokenRequestError = BasicRequestTokenError<HttpClientError<reqwest::Error>>;

/// Errors that can occur while talking to the token endpoint or the consent API
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{0}' cannot be used as a base URL")]
    NotABaseUrl(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Token request failed: {0}")]
    TokenEndpoint(#[source] TokenRequestError),
    #[error("Access token contains characters not allowed in a header value")]
    InvalidToken,
    #[error("Consent API returned HTTP {status} for {context}")]
    ConsentApi { status: StatusCode, context: String },
}

// Transport failures stay `Http` so callers can inspect timeouts and connect errors.
impl From<TokenRequestError> for AdminError {
    fn from(err: TokenRequestError) -> Self {
        match err {
            RequestTokenError::Request(HttpClientError::Reqwest(inner)) => AdminError::Http(*inner),
            other => AdminError::TokenEndpoint(other),
        }
    }
}

impl AdminError {
    /// Whether the failure originated in a remote service rather than in local setup
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AdminError::Http(_)
                | AdminError::TokenEndpoint(_)
                | AdminError::InvalidToken
                | AdminError::ConsentApi { .. }
        )
    }
}
