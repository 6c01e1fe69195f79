//! Client side of the consent administrative API.
//!
//! [`TokenProvider`] performs the OAuth 2.0 client-credentials exchange against the token
//! endpoint and hands back a [`ConsentAdminClient`] whose requests carry the fetched bearer
//! token. Tokens are never cached: every call to [`TokenProvider::admin_client`] hits the
//! token endpoint again.

mod client;
mod error;
mod models;
mod token;

pub use client::ConsentAdminClient;
pub use error::{AdminError, TokenRequestError};
pub use models::{AcceptConsent, ConsentRequest, RejectConsent};
pub use oauth2;
pub use reqwest::StatusCode;
pub use token::{ClientAuthMethod, TokenProvider, TokenProviderOptions, DEFAULT_CONSENT_SCOPE};
