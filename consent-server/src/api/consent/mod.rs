//! Consent decision routes.
//!
//! `GET /consent` is where the identity provider sends the user agent during
//! the consent step. Depending on the requested scopes and the session subject
//! the request is rejected, accepted or answered with a login form. The form
//! posts back to `POST /consent`, which logs the user in and accepts.

pub(crate) mod decision;
pub(crate) mod handlers;
pub(crate) mod models;

use crate::state::AppState;
use axum::{routing::get, Router};

pub(super) fn router() -> Router<AppState> {
    Router::new().route(
        "/consent",
        get(handlers::consent_page).post(handlers::consent_submit),
    )
}
