//! Browser-side calls to the backend.
//!
//! Both calls are best-effort: failures end up in the console and nowhere
//! else, and nothing is retried.

use leptos::prelude::*;

use crate::model::{InteractionLog, NavIdentity, UserInfo};

pub const USER_INFO_PATH: &str = "/api/user-info";
pub const LOG_INTERACTION_PATH: &str = "/api/log-interaction";

/// Fetch options for a JSON POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostOptions {
    pub method: &'static str,
    pub content_type: &'static str,
    pub keepalive: bool,
}

/// Nav clicks redirect right after logging, so the request has to outlive
/// the page that sent it.
pub const INTERACTION_POST: PostOptions = PostOptions {
    method: "POST",
    content_type: "application/json",
    keepalive: true,
};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no browser window available")]
    NoWindow,

    #[error("request failed: {0}")]
    Network(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load the current user into `identity` without blocking the caller.
///
/// A non-success status (anonymous visitors get a 401) leaves the defaults
/// in place silently; other failures are logged.
pub fn load_user_info(identity: RwSignal<NavIdentity>) {
    spawn_browser_task(async move {
        match resolve_user_info(fetch_user_info().await) {
            Ok(Some(loaded)) => identity.set(loaded),
            Ok(None) => {}
            Err(err) => leptos::logging::error!("Error loading user info: {err}"),
        }
    });
}

/// Header state to apply for a user-info outcome.
///
/// `Ok(None)` keeps the defaults: the visitor is anonymous or the backend
/// answered with a non-success status. `Err` is worth a console message.
///
/// # Errors
///
/// Passes through network, decode and missing-window failures.
pub fn resolve_user_info(
    outcome: Result<UserInfo, FetchError>,
) -> Result<Option<NavIdentity>, FetchError> {
    match outcome {
        Ok(info) if info.authenticated => Ok(Some(NavIdentity::from_user_info(&info))),
        Ok(_) | Err(FetchError::Status(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Decode a `/api/user-info` body.
///
/// # Errors
///
/// Returns [`FetchError::Json`] when the body is not a user-info record.
pub fn parse_user_info(body: &str) -> Result<UserInfo, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// Send an interaction log without waiting for delivery.
pub fn log_interaction(log: InteractionLog) {
    spawn_browser_task(async move {
        if let Err(err) = post_interaction(&log).await {
            leptos::logging::error!("Error logging interaction: {err}");
        }
    });
}

#[cfg(feature = "hydrate")]
fn spawn_browser_task(task: impl std::future::Future<Output = ()> + 'static) {
    leptos::task::spawn_local(task);
}

// Event handlers and effects only run in the browser.
#[cfg(not(feature = "hydrate"))]
fn spawn_browser_task(task: impl std::future::Future<Output = ()> + 'static) {
    drop(task);
}

/// `GET /api/user-info`.
///
/// # Errors
///
/// Returns [`FetchError`] when the request fails, the status is not a
/// success, or the body is not a user-info record.
pub async fn fetch_user_info() -> Result<UserInfo, FetchError> {
    let body = browser::get_text(USER_INFO_PATH).await?;
    parse_user_info(&body)
}

/// `POST /api/log-interaction`.
///
/// # Errors
///
/// Returns [`FetchError`] when the request fails or the status is not a
/// success.
pub async fn post_interaction(log: &InteractionLog) -> Result<(), FetchError> {
    let body = serde_json::to_string(log)?;
    browser::post_json(LOG_INTERACTION_PATH, &body, INTERACTION_POST).await
}

#[cfg(feature = "hydrate")]
mod browser {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::{FetchError, PostOptions};

    fn js_error(value: &JsValue) -> FetchError {
        FetchError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }

    async fn send(request: &Request) -> Result<Response, FetchError> {
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;
        let value = JsFuture::from(window.fetch_with_request(request))
            .await
            .map_err(|e| js_error(&e))?;
        let response: Response = value.dyn_into().map_err(|e| js_error(&e))?;

        if response.ok() {
            Ok(response)
        } else {
            Err(FetchError::Status(response.status()))
        }
    }

    pub async fn get_text(path: &str) -> Result<String, FetchError> {
        let request = Request::new_with_str(path).map_err(|e| js_error(&e))?;
        let response = send(&request).await?;

        let text = response.text().map_err(|e| js_error(&e))?;
        let text = JsFuture::from(text).await.map_err(|e| js_error(&e))?;
        text.as_string()
            .ok_or_else(|| FetchError::Network("response body is not text".to_string()))
    }

    pub async fn post_json(
        path: &str,
        body: &str,
        options: PostOptions,
    ) -> Result<(), FetchError> {
        let init = RequestInit::new();
        init.set_method(options.method);
        init.set_body(&JsValue::from_str(body));
        init.set_keepalive(options.keepalive);

        let request = Request::new_with_str_and_init(path, &init).map_err(|e| js_error(&e))?;
        request
            .headers()
            .set("Content-Type", options.content_type)
            .map_err(|e| js_error(&e))?;

        send(&request).await.map(|_| ())
    }
}

#[cfg(not(feature = "hydrate"))]
mod browser {
    use super::{FetchError, PostOptions};

    #[allow(clippy::unused_async)]
    pub async fn get_text(_path: &str) -> Result<String, FetchError> {
        Err(FetchError::NoWindow)
    }

    #[allow(clippy::unused_async)]
    pub async fn post_json(
        _path: &str,
        _body: &str,
        _options: PostOptions,
    ) -> Result<(), FetchError> {
        Err(FetchError::NoWindow)
    }
}
