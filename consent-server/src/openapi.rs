use crate::api;
use utoipa::OpenApi;

pub(crate) const CONSENT_TAG: &str = "Consent API";
pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const SESSION_TAG: &str = "Session API";

#[derive(OpenApi)]
#[openapi(
    paths(
        api::index::index,
        api::health::health_check,
        api::logout::logout,
        api::consent::handlers::consent_page,
        api::consent::handlers::consent_submit,
    ),
    tags(
        (name = CONSENT_TAG, description = "Consent decision endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = SESSION_TAG, description = "Session endpoints"),
    ),
    info(
        title = "Consent App API",
        description = "OAuth 2.0 consent relay",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/healthz", "/logout", "/consent"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let consent = &doc.paths.paths["/consent"];
        assert!(consent.get.is_some());
        assert!(consent.post.is_some());
    }
}
