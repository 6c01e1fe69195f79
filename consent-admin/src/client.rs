//! Consent administrative API client

use crate::error::AdminError;
use crate::models::{AcceptConsent, ConsentRequest, RejectConsent};
use log::{debug, error, warn};
use oauth2::AccessToken;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

/// Authenticated client for `GET {id}`, `PATCH {id}/accept` and `PATCH {id}/reject`
#[derive(Debug, Clone)]
pub struct ConsentAdminClient {
    client: Client,
    base_url: Url,
}

impl ConsentAdminClient {
    /// Create a client from an already configured HTTP client
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Create a client that sends `Authorization: Bearer <token>` with every request
    pub fn with_token(token: &AccessToken, base_url: Url) -> Result<Self, AdminError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.secret()))
            .map_err(|_| AdminError::InvalidToken)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self::new(client, base_url))
    }

    /// Fetch a consent request by id. Any non-success status is an error.
    pub async fn get_consent_request(&self, consent_id: &str) -> Result<ConsentRequest, AdminError> {
        let url = self.consent_url(consent_id, None)?;

        debug!("Fetching consent request from {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Consent API error {}: {}", status, error_text);
            return Err(AdminError::ConsentApi {
                status,
                context: format!("consent request '{consent_id}'"),
            });
        }

        let consent: ConsentRequest = response.json().await?;

        debug!(
            "Fetched consent request '{}' with {} requested scopes",
            consent.id,
            consent.requested_scopes.len()
        );
        Ok(consent)
    }

    /// Accept a consent request, granting exactly the requested scopes to `subject`.
    ///
    /// Returns the status of the consent API. Only transport failures are errors.
    pub async fn accept(
        &self,
        consent: &ConsentRequest,
        subject: &str,
    ) -> Result<StatusCode, AdminError> {
        let body = AcceptConsent {
            grant_scopes: consent.requested_scopes.clone(),
            subject: subject.to_string(),
        };
        self.decide(&consent.id, "accept", &body).await
    }

    /// Reject a consent request with a free-text reason.
    ///
    /// Returns the status of the consent API. Only transport failures are errors.
    pub async fn reject(
        &self,
        consent: &ConsentRequest,
        reason: &str,
    ) -> Result<StatusCode, AdminError> {
        let body = RejectConsent {
            reason: reason.to_string(),
        };
        self.decide(&consent.id, "reject", &body).await
    }

    async fn decide<B: Serialize>(
        &self,
        consent_id: &str,
        action: &str,
        body: &B,
    ) -> Result<StatusCode, AdminError> {
        let url = self.consent_url(consent_id, Some(action))?;

        debug!("Sending consent decision to {}", url);

        let response = self.client.patch(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                "Consent API answered {} to {} of consent request '{}'",
                status, action, consent_id
            );
        }

        Ok(status)
    }

    fn consent_url(&self, consent_id: &str, action: Option<&str>) -> Result<Url, AdminError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AdminError::NotABaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(consent_id);
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }
}
