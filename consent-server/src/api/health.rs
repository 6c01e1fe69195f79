use crate::openapi::HEALTH_TAG;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Represents the health status of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HealthStatusType {
    #[serde(rename = "ok")]
    Ok,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatusType,
}

/// Liveness check, independent of the consent service
#[utoipa::path(
    get,
    path = "/healthz",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub(crate) async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatusType::Ok,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(health_check))
}

#[cfg(test)]
mod test {
    use crate::test_utils::TestFixture;
    use serde_json::json;

    #[tokio::test]
    async fn test_health_endpoint() {
        let fixture = TestFixture::new().await;
        let response = fixture.get("/healthz", None).await;
        response.assert_ok();
        assert_eq!(response.json(), json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_health_ignores_upstream_outage() {
        let fixture = TestFixture::new().await;
        // A broken token endpoint must not be consulted
        fixture.mock_token_failure(503, 0).await;

        let response = fixture.get("/healthz", None).await;
        response.assert_ok();
        assert_eq!(response.json(), json!({ "status": "ok" }));
    }
}
