use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid backend url: {0}")]
    BackendUrl(#[from] url::ParseError),

    #[error("path not forwardable: {0}")]
    InvalidPath(String),

    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Self::BackendUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (self.status(), self.to_string()).into_response()
    }
}
