use crate::state::AppState;
use axum::{routing::get, Router};

pub(crate) const BANNER: &str = "This is the consent app";

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Plain text banner", body = String, content_type = "text/plain")
    )
)]
pub(crate) async fn index() -> &'static str {
    BANNER
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
