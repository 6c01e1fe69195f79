pub(crate) mod consent;
pub(crate) mod health;
pub(crate) mod index;
pub(crate) mod logout;

use crate::state::AppState;
use axum::Router;

/// Combines all API routes into a single router
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .merge(index::router())
        .merge(health::router())
        .merge(logout::router())
        .merge(consent::router())
}
