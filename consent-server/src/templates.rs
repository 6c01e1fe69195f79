//! HTML pages rendered by the consent routes.

use crate::errors::ApiError;
use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use log::error;

/// Error page, used for upstream errors and malformed requests
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub error: &'a str,
    pub error_description: &'a str,
}

impl ErrorTemplate<'static> {
    pub fn missing_consent_id() -> Self {
        Self {
            error: "no consent id",
            error_description: "No consent ID was given for the request",
        }
    }
}

/// Login form bound to a single consent request
#[derive(Template)]
#[template(path = "consent.html")]
pub struct LoginTemplate<'a> {
    pub consent_id: &'a str,
    pub client_id: Option<&'a str>,
    pub scopes: &'a [String],
}

pub fn render<T: Template>(status: StatusCode, template: &T) -> Result<Response, ApiError> {
    match template.render() {
        Ok(html) => Ok((status, Html(html)).into_response()),
        Err(e) => {
            error!("Failed to render template: {}", e);
            Err(ApiError::internal("Failed to render page"))
        }
    }
}
