use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::error::Error as StdError;
use std::fmt;

use crate::config::Environment;
use crate::repositories::RepositoryError;

#[derive(Debug)]
pub enum ServiceError {
    ValidationError(String),
    NotFound(String),
    AuthenticationError(String),
    /// Operator mistake: a required setting is absent. Always reported verbatim.
    Configuration(String),
    /// Both data paths failed. `detail` is only filled outside production.
    Upstream {
        message: String,
        detail: Option<String>,
    },
    InternalError(String),
}

impl ServiceError {
    /// Classifies a repository failure for the API boundary.
    pub fn from_repository(
        message: impl Into<String>,
        err: RepositoryError,
        environment: Environment,
    ) -> Self {
        let message = message.into();
        match err {
            RepositoryError::Conflict(reason) => {
                ServiceError::ValidationError(format!("{}: {}", message, reason))
            }
            other => {
                tracing::error!(error = %other, "{}", message);
                ServiceError::Upstream {
                    message,
                    detail: (!environment.is_production()).then(|| other.to_string()),
                }
            }
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::AuthenticationError(msg) => write!(f, "Authentication error: {}", msg),
            ServiceError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ServiceError::Upstream { message, detail } => match detail {
                Some(detail) => write!(f, "Upstream error: {} ({})", message, detail),
                None => write!(f, "Upstream error: {}", message),
            },
            ServiceError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Configuration(_)
            | ServiceError::Upstream { .. }
            | ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ServiceError::ValidationError(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::AuthenticationError(msg)
            | ServiceError::Configuration(msg) => msg.clone(),
            ServiceError::Upstream { message, detail } => {
                detail.clone().unwrap_or_else(|| message.clone())
            }
            ServiceError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
