use std::any::Any;
use std::backtrace::Backtrace;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::config::Environment;

/// Catch-all error boundary for route handlers.
///
/// Renders `{"status": .., "message": .., "stack": ..}`. The `stack` field is
/// only present outside production.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    stack: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: u16,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<&'a str>,
}

impl AppError {
    /// Internal server error capturing the error chain and current backtrace.
    pub fn internal(error: &(dyn std::error::Error + 'static), environment: Environment) -> Self {
        let stack = (!environment.is_production()).then(|| {
            let mut chain = error.to_string();
            let mut source = error.source();
            while let Some(cause) = source {
                chain.push_str("\ncaused by: ");
                chain.push_str(&cause.to_string());
                source = cause.source();
            }
            format!("{chain}\n{}", Backtrace::force_capture())
        });

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
            stack,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response for a panic caught by `CatchPanicLayer`.
    pub(super) fn from_panic(panic: &(dyn Any + Send), environment: Environment) -> Self {
        let detail = panic
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| panic.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic payload");

        tracing::error!(panic = %detail, "Handler panicked");

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal Server Error".into(),
            stack: (!environment.is_production()).then(|| format!("panicked: {detail}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "Request failed");
        }
        let body = ErrorBody {
            status: self.status.as_u16(),
            message: &self.message,
            stack: self.stack.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}
