use std::any::Any;

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tower_http::catch_panic::ResponseForPanic;
use tracing::error;

use crate::config::AppEnvironment;
use crate::store::{FilterError, StoreError};
use crate::utils::response::{error as error_response, ApiResponse};

/// Replaces internal failure details outside development.
pub const REDACTED_DETAIL: &str = "Server error";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: StoreError,
    },

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    /// Wraps a store failure with the message shown to the client, for use
    /// with `map_err`.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store {
            message: message.to_string(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => {
                tracing::debug!(error = ?self, message = %msg, "Request rejected");
            }
            AppError::Store { message, source } => {
                error!(error = ?source, message = %message, "Store error");
            }
            AppError::InternalServerError(detail) => {
                error!(detail = %detail, "Internal server error");
            }
        }
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

/// Attached to 5xx responses so the detail can be redacted after the fact.
#[derive(Debug, Clone)]
struct InternalFailure {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        let (message, detail) = match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => (msg, None),
            AppError::Store { message, source } => (message, Some(source.to_string())),
            AppError::InternalServerError(detail) => {
                (INTERNAL_ERROR_MESSAGE.to_string(), Some(detail))
            }
        };

        let mut response = error_response(status, message.clone(), detail);
        if status.is_server_error() {
            response
                .extensions_mut()
                .insert(InternalFailure { message });
        }
        response
    }
}

/// Strips failure details from 5xx envelopes in production.
pub async fn redact_internal_errors(
    State(environment): State<AppEnvironment>,
    response: Response,
) -> Response {
    if !environment.is_production() {
        return response;
    }

    let Some(InternalFailure { message }) = response.extensions().get::<InternalFailure>().cloned()
    else {
        return response;
    };

    let (parts, _) = response.into_parts();
    let body = ApiResponse::failure(message, Some(REDACTED_DETAIL.to_string()));
    (parts, Json(body)).into_response()
}

/// Turns a handler panic into the standard 500 envelope.
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    environment: AppEnvironment,
}

impl PanicResponder {
    pub fn new(environment: AppEnvironment) -> Self {
        Self { environment }
    }
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let detail = panic_message(err.as_ref());
        error!(panic = %detail, "Handler panicked");

        let detail = if self.environment.is_production() {
            REDACTED_DETAIL.to_string()
        } else {
            detail
        };

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_MESSAGE,
            Some(detail),
        )
    }
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    }
}
