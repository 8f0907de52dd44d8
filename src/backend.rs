//! Forwarding of backend-owned paths to the upstream application server.
//!
//! The nav only consumes `/api/user-info`, `/api/log-interaction`, `/login`
//! and `/logout`; none of them are answered here.

use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, Uri},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::config::BackendConfig;
use crate::error::AppError;

const FORWARDED_REQUEST_HEADERS: [HeaderName; 4] = [
    header::ACCEPT,
    header::AUTHORIZATION,
    header::CONTENT_TYPE,
    header::COOKIE,
];

const RELAYED_RESPONSE_HEADERS: [HeaderName; 4] = [
    header::CACHE_CONTROL,
    header::CONTENT_TYPE,
    header::LOCATION,
    header::SET_COOKIE,
];

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base: Url,
}

impl BackendClient {
    /// # Errors
    ///
    /// Fails when the configured URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, AppError> {
        let mut base = Url::parse(&config.url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        // Redirects (e.g. /logout -> /login) go back to the browser untouched.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client, base })
    }

    /// # Errors
    ///
    /// Fails when `path_and_query` cannot be joined onto the base URL, or
    /// when it carries `.`/`..` segments that would escape the forwarded
    /// route once resolved.
    pub fn upstream_url(&self, path_and_query: &str) -> Result<Url, AppError> {
        let path = path_and_query
            .split_once('?')
            .map_or(path_and_query, |(path, _)| path);
        if path.split('/').any(is_dot_segment) {
            return Err(AppError::InvalidPath(path.to_string()));
        }

        let url = self.base.join(path_and_query.trim_start_matches('/'))?;
        if !url.path().starts_with(self.base.path()) {
            return Err(AppError::InvalidPath(path.to_string()));
        }
        Ok(url)
    }

    /// # Errors
    ///
    /// Fails when the upstream cannot be reached or times out.
    #[tracing::instrument(skip(self, headers, body), fields(upstream.url))]
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<reqwest::Response, AppError> {
        let url = self.upstream_url(path_and_query)?;
        tracing::Span::current().record("upstream.url", url.as_str());

        let mut request = self.client.request(method, url).body(body);
        for name in &FORWARDED_REQUEST_HEADERS {
            for value in headers.get_all(name) {
                request = request.header(name, value);
            }
        }

        let response = request.send().await?;
        tracing::debug!(status = response.status().as_u16(), "backend responded");
        Ok(response)
    }
}

/// `.` or `..`, including their percent-encoded spellings.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

async fn relay(upstream: reqwest::Response) -> Result<Response, AppError> {
    let status = upstream.status();

    let mut headers = HeaderMap::new();
    for name in &RELAYED_RESPONSE_HEADERS {
        for value in upstream.headers().get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    let body = upstream.bytes().await?;
    Ok((status, headers, body).into_response())
}

/// Axum handler that forwards the request verbatim and relays the answer.
///
/// # Errors
///
/// Returns 400 for paths with dot segments, and 502 (504 on timeout) when
/// the backend cannot answer.
pub async fn forward_to_backend(
    State(backend): State<BackendClient>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());

    let upstream = backend.forward(method, path, &headers, body).await?;
    relay(upstream).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use wiremock::matchers::{body_json, header as header_is, method as method_is, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(url: &str, timeout: u64) -> BackendClient {
        BackendClient::new(&BackendConfig {
            url: url.to_string(),
            timeout,
        })
        .unwrap()
    }

    async fn body_of(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[test]
    fn joins_paths_onto_base() {
        let backend = client_for("http://backend:5000", 10);
        assert_eq!(
            backend.upstream_url("/api/user-info").unwrap().as_str(),
            "http://backend:5000/api/user-info"
        );

        let nested = client_for("http://backend:5000/laila", 10);
        assert_eq!(
            nested.upstream_url("/api/user-info?fresh=1").unwrap().as_str(),
            "http://backend:5000/laila/api/user-info?fresh=1"
        );
    }

    #[test]
    fn rejects_dot_segments() {
        let backend = client_for("http://backend:5000", 10);

        for path in [
            "/api/../admin/users",
            "/api/%2e%2e/api-settings",
            "/api/%2E./api-settings",
            "/api/./user-info",
            "/api/user-info/..?x=1",
        ] {
            let err = backend.upstream_url(path).unwrap_err();
            assert!(matches!(err, AppError::InvalidPath(_)), "{path}");
        }

        assert!(backend.upstream_url("/api/user-info?next=../x").is_ok());
        assert!(backend.upstream_url("/api/v1..2/info").is_ok());
    }

    #[tokio::test]
    async fn dot_segment_request_is_bad_request() {
        let err = forward_to_backend(
            State(client_for("http://backend:5000", 10)),
            Method::GET,
            Uri::from_static("/api/%2e%2e/api-settings"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = BackendClient::new(&BackendConfig {
            url: "backend without scheme".to_string(),
            timeout: 10,
        })
        .unwrap_err();

        assert!(matches!(err, AppError::BackendUrl(_)));
    }

    #[tokio::test]
    async fn forwards_user_info_with_session_cookie() {
        let mock_server = MockServer::start().await;

        let body = serde_json::json!({
            "authenticated": true,
            "user": {"id": 1, "fullname": "Ada Lovelace", "email": "ada@example.org", "is_admin": true}
        });

        Mock::given(method_is("GET"))
            .and(path("/api/user-info"))
            .and(header_is("cookie", "session=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("test"));

        let response = forward_to_backend(
            State(client_for(&mock_server.uri(), 10)),
            Method::GET,
            Uri::from_static("/api/user-info"),
            headers,
            Bytes::new(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let parsed: crate::model::UserInfo = serde_json::from_slice(&body_of(response).await).unwrap();
        assert!(parsed.authenticated);
        assert!(parsed.user.unwrap().is_admin);
    }

    #[tokio::test]
    async fn forwards_interaction_log_body() {
        let mock_server = MockServer::start().await;

        let payload = serde_json::json!({
            "action": "page_view",
            "page": "main-menu",
            "element_id": null,
            "element_type": null,
            "element_value": null,
            "interaction_type": "user_click",
            "timestamp": "2025-03-01T12:00:00.000Z"
        });

        Mock::given(method_is("POST"))
            .and(path("/api/log-interaction"))
            .and(header_is("content-type", "application/json"))
            .and(body_json(&payload))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "success"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = forward_to_backend(
            State(client_for(&mock_server.uri(), 10)),
            Method::POST,
            Uri::from_static("/api/log-interaction"),
            headers,
            Bytes::from(serde_json::to_vec(&payload).unwrap()),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn keeps_query_string() {
        let mock_server = MockServer::start().await;

        Mock::given(method_is("GET"))
            .and(path("/api/user-info"))
            .and(query_param("fresh", "1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = forward_to_backend(
            State(client_for(&mock_server.uri(), 10)),
            Method::GET,
            Uri::from_static("/api/user-info?fresh=1"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn relays_unauthorized_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method_is("GET"))
            .and(path("/api/user-info"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"authenticated": false})),
            )
            .mount(&mock_server)
            .await;

        let response = forward_to_backend(
            State(client_for(&mock_server.uri(), 10)),
            Method::GET,
            Uri::from_static("/api/user-info"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn relays_logout_redirect_and_cookie() {
        let mock_server = MockServer::start().await;

        Mock::given(method_is("GET"))
            .and(path("/logout"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", "/login")
                    .insert_header("set-cookie", "session=; Max-Age=0; Path=/")
                    .insert_header("x-backend-internal", "1"),
            )
            .mount(&mock_server)
            .await;

        let response = forward_to_backend(
            State(client_for(&mock_server.uri(), 10)),
            Method::GET,
            Uri::from_static("/logout"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        assert_eq!(
            response.headers()[header::SET_COOKIE],
            "session=; Max-Age=0; Path=/"
        );
        assert!(response.headers().get("x-backend-internal").is_none());
    }

    #[tokio::test]
    async fn unreachable_backend_is_bad_gateway() {
        let err = forward_to_backend(
            State(client_for("http://127.0.0.1:1", 10)),
            Method::GET,
            Uri::from_static("/api/user-info"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn slow_backend_is_gateway_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method_is("GET"))
            .and(path("/api/user-info"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let err = forward_to_backend(
            State(client_for(&mock_server.uri(), 1)),
            Method::GET,
            Uri::from_static("/api/user-info"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
