use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters of `GET /consent`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConsentQuery {
    /// Error code set by the identity provider when the flow failed upstream
    pub error: Option<String>,
    /// Human readable description of `error`
    pub error_description: Option<String>,
    /// Identifier of the consent request
    pub consent: Option<String>,
}

/// Query parameters of `POST /consent`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConsentSubmitQuery {
    /// Identifier of the consent request
    pub consent: Option<String>,
}

/// Login form submitted from the consent page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginForm {
    /// Identity scheme, e.g. `local` or `email`
    pub scheme: String,
    /// Identifier within the scheme
    pub identifier: String,
}

/// Returns the consent id if it is present and not empty
pub(crate) fn consent_id(consent: &Option<String>) -> Option<&str> {
    consent.as_deref().filter(|id| !id.is_empty())
}
