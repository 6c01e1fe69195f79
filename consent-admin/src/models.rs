//! Wire models for the consent API

use serde::{Deserialize, Serialize};

/// A pending consent decision as reported by the consent API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequest {
    pub id: String,
    #[serde(default)]
    pub requested_scopes: Vec<String>,
    pub redirect_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl ConsentRequest {
    /// Check if the client asked for a specific scope
    pub fn requests_scope(&self, scope: &str) -> bool {
        self.requested_scopes.iter().any(|s| s == scope)
    }
}

/// Body of `PATCH {id}/accept`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptConsent {
    pub grant_scopes: Vec<String>,
    pub subject: String,
}

/// Body of `PATCH {id}/reject`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectConsent {
    pub reason: String,
}
