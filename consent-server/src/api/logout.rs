use crate::openapi::SESSION_TAG;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::cookie::SignedCookieJar;
use log::info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/logout",
    tag = SESSION_TAG,
    responses(
        (status = 200, description = "Session cleared, or there was nothing to clear", body = LogoutResponse)
    )
)]
pub(crate) async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<LogoutResponse>) {
    let (jar, cleared) = state.session.clear(jar);
    let message = if cleared {
        info!("Cleared session subject");
        "logged out"
    } else {
        "no user logged in"
    };
    (
        jar,
        Json(LogoutResponse {
            message: message.to_string(),
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/logout", get(logout))
}
