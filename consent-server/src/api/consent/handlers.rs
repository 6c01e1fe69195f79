use super::decision::{decide, Decision};
use super::models::{consent_id, ConsentQuery, ConsentSubmitQuery, LoginForm};
use crate::errors::ApiError;
use crate::openapi::CONSENT_TAG;
use crate::session::Subject;
use crate::state::AppState;
use crate::templates::{render, ErrorTemplate, LoginTemplate};
use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use consent_admin::{ConsentAdminClient, ConsentRequest};
use http::StatusCode;
use log::{debug, info};

#[utoipa::path(
    get,
    path = "/consent",
    tag = CONSENT_TAG,
    params(ConsentQuery),
    responses(
        (status = 200, description = "Login form, or error page for an upstream error", content_type = "text/html"),
        (status = 303, description = "Consent accepted or rejected, redirect to the consent redirect URL"),
        (status = 400, description = "Error page, no consent id was given", content_type = "text/html"),
        (status = 502, description = "Consent service request failed"),
    )
)]
pub(crate) async fn consent_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<ConsentQuery>,
) -> Result<Response, ApiError> {
    if let Some(error) = query.error.as_deref() {
        info!("Identity provider reported error '{}'", error);
        let page = ErrorTemplate {
            error,
            error_description: query.error_description.as_deref().unwrap_or_default(),
        };
        return render(StatusCode::OK, &page);
    }

    let Some(consent_id) = consent_id(&query.consent) else {
        return render(StatusCode::BAD_REQUEST, &ErrorTemplate::missing_consent_id());
    };

    let admin = state.token_provider.admin_client().await?;
    let consent = admin.get_consent_request(consent_id).await?;

    match decide(&consent.requested_scopes, state.session.subject(&jar)) {
        Decision::Reject { reason } => reject_request(&admin, &consent, reason).await,
        Decision::Accept { subject } => accept_request(&admin, &consent, &subject).await,
        Decision::Prompt => {
            info!("Prompting for login on consent request '{}'", consent.id);
            let page = LoginTemplate {
                consent_id: &consent.id,
                client_id: consent.client_id.as_deref(),
                scopes: &consent.requested_scopes,
            };
            render(StatusCode::OK, &page)
        }
    }
}

#[utoipa::path(
    post,
    path = "/consent",
    tag = CONSENT_TAG,
    params(ConsentSubmitQuery),
    request_body(
        content = LoginForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Identity of the user logging in"
    ),
    responses(
        (status = 303, description = "Consent accepted, redirect to the consent redirect URL"),
        (status = 400, description = "No consent id was given (plain text), or the login form is incomplete (JSON detail)"),
        (status = 502, description = "Consent service request failed"),
    )
)]
pub(crate) async fn consent_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<ConsentSubmitQuery>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Some(consent_id) = consent_id(&query.consent) else {
        return Ok((StatusCode::BAD_REQUEST, "no consent id").into_response());
    };

    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            debug!("Rejected login form: {}", rejection);
            return Err(ApiError::bad_request(rejection.body_text()));
        }
    };

    let admin = state.token_provider.admin_client().await?;
    let consent = admin.get_consent_request(consent_id).await?;

    let subject = Subject::new(&form.scheme, &form.identifier);
    info!("Logged in '{}' for consent request '{}'", subject, consent.id);
    let jar = state.session.store(jar, &subject);

    let redirect = accept_request(&admin, &consent, &subject).await?;
    Ok((jar, redirect).into_response())
}

async fn accept_request(
    admin: &ConsentAdminClient,
    consent: &ConsentRequest,
    subject: &Subject,
) -> Result<Response, ApiError> {
    let status = admin.accept(consent, subject.as_str()).await?;
    info!(
        "Accepted consent request '{}' for '{}' ({})",
        consent.id, subject, status
    );
    Ok(Redirect::to(&consent.redirect_url).into_response())
}

async fn reject_request(
    admin: &ConsentAdminClient,
    consent: &ConsentRequest,
    reason: &str,
) -> Result<Response, ApiError> {
    let status = admin.reject(consent, reason).await?;
    info!(
        "Rejected consent request '{}': {} ({})",
        consent.id, reason, status
    );
    Ok(Redirect::to(&consent.redirect_url).into_response())
}
