use crate::config::ConsentConfig;
use crate::create_app;
use crate::state::AppState;
use axum::body::{Body, Bytes};
use axum::Router;
use http::{header, HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

/// Access token handed out by the mocked token endpoint
pub const TEST_TOKEN: &str = "test-token";

const CONSENT_PATH: &str = "/oauth2/consent/requests";

/// Test fixture for driving the consent app against mocked upstream services.
///
/// Two mock servers stand in for the token endpoint and the consent
/// administrative API. Requests are sent straight into the router, and the
/// session cookie can be carried from one response into the next request.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_login() {
///     let fixture = TestFixture::new().await;
///     fixture.mock_token(1).await;
///     fixture.mock_consent("abc", &["openid"], "https://idp/return").await;
///     fixture.mock_accept("abc", &["openid"], "local:alice", 1).await;
///
///     let response = fixture
///         .post_form("/consent?consent=abc", &[("scheme", "local"), ("identifier", "alice")], None)
///         .await;
///     response.assert_status(StatusCode::SEE_OTHER);
///     let cookie = response.session_cookie().unwrap();
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Mock server for the OAuth 2.0 token endpoint
    pub token_mock: MockServer,
    /// Mock server for the consent administrative API
    pub admin_mock: MockServer,
}

impl TestFixture {
    /// Creates a new test fixture with fresh mock servers.
    pub async fn new() -> Self {
        Self::setup_logger(LevelFilter::Debug);

        let token_mock = MockServer::start().await;
        let admin_mock = MockServer::start().await;

        let config = ConsentConfig::for_test_with_mocks(&token_mock, &admin_mock);
        let state = AppState::new(config).expect("Failed to create test state");
        let app = create_app(state).await;

        Self {
            app,
            token_mock,
            admin_mock,
        }
    }

    /// Initializes the test logger with the given level.
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Creates a request builder, attaching the given `Cookie` header if any.
    pub fn request_builder(
        &self,
        method: Method,
        uri: impl AsRef<str>,
        cookie: Option<&str>,
    ) -> http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri.as_ref());
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    /// Sends a GET request to the specified URI.
    pub async fn get(&self, uri: impl AsRef<str>, cookie: Option<&str>) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri, cookie)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with an url-encoded form body.
    pub async fn post_form(
        &self,
        uri: impl AsRef<str>,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request_builder(Method::POST, uri, cookie)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request and returns a TestResponse.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Token endpoint answering with [`TEST_TOKEN`], called `expected_calls` times.
    pub async fn mock_token(&self, expected_calls: u64) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": TEST_TOKEN,
                "token_type": "bearer",
                "expires_in": 3599,
                "scope": "hydra.consent",
            })))
            .expect(expected_calls)
            .mount(&self.token_mock)
            .await;
    }

    /// Token endpoint failing with `status`.
    pub async fn mock_token_failure(&self, status: u16, expected_calls: u64) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": "invalid_client",
            })))
            .expect(expected_calls)
            .mount(&self.token_mock)
            .await;
    }

    /// Consent request `id`, only served to callers with the test token.
    pub async fn mock_consent(&self, id: &str, scopes: &[&str], redirect_url: &str) {
        Mock::given(matchers::method("GET"))
            .and(matchers::path(format!("{CONSENT_PATH}/{id}")))
            .and(matchers::header(
                "Authorization",
                format!("Bearer {TEST_TOKEN}").as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "requestedScopes": scopes,
                "redirectUrl": redirect_url,
                "clientId": "test-client",
            })))
            .mount(&self.admin_mock)
            .await;
    }

    /// Accept call for `id` with exactly these scopes and subject.
    pub async fn mock_accept(&self, id: &str, scopes: &[&str], subject: &str, expected_calls: u64) {
        Mock::given(matchers::method("PATCH"))
            .and(matchers::path(format!("{CONSENT_PATH}/{id}/accept")))
            .and(matchers::body_json(json!({
                "grantScopes": scopes,
                "subject": subject,
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(expected_calls)
            .mount(&self.admin_mock)
            .await;
    }

    /// Reject call for `id` with exactly this reason.
    pub async fn mock_reject(&self, id: &str, reason: &str, expected_calls: u64) {
        Mock::given(matchers::method("PATCH"))
            .and(matchers::path(format!("{CONSENT_PATH}/{id}/reject")))
            .and(matchers::body_json(json!({ "reason": reason })))
            .respond_with(ResponseTemplate::new(200))
            .expect(expected_calls)
            .mount(&self.admin_mock)
            .await;
    }

    /// Accept call for any consent request.
    pub async fn mock_any_accept(&self, expected_calls: u64) {
        self.mock_any_decision("accept", expected_calls).await;
    }

    /// Reject call for any consent request.
    pub async fn mock_any_reject(&self, expected_calls: u64) {
        self.mock_any_decision("reject", expected_calls).await;
    }

    async fn mock_any_decision(&self, action: &str, expected_calls: u64) {
        Mock::given(matchers::method("PATCH"))
            .and(matchers::path_regex(format!(
                "^{CONSENT_PATH}/[^/]+/{action}$"
            )))
            .respond_with(ResponseTemplate::new(200))
            .expect(expected_calls)
            .mount(&self.admin_mock)
            .await;
    }

    /// Decision call for `id` answering with `status`.
    pub async fn mock_decision_status(
        &self,
        id: &str,
        action: &str,
        status: u16,
        expected_calls: u64,
    ) {
        Mock::given(matchers::method("PATCH"))
            .and(matchers::path(format!("{CONSENT_PATH}/{id}/{action}")))
            .respond_with(ResponseTemplate::new(status))
            .expect(expected_calls)
            .mount(&self.admin_mock)
            .await;
    }
}

/// Response from a test request.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl TestResponse {
    /// Asserts that the response has the expected status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match the expected value.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Asserts that the response status is OK (200).
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Body parsed as JSON, `{}` if it is not JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|_| json!({}))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// The session cookie as `name=value`, ready to be sent back as a `Cookie` header.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter(|value| value.starts_with("consent_session="))
            .filter_map(|value| value.split(';').next())
            .map(str::to_string)
            .next()
    }
}
