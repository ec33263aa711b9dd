// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::{CheckoutError, FlowError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  Validation(String),

  /// Missing credentials or a failed login.
  #[error("{0}")]
  Auth(String),

  /// Credentials were presented but are not good enough (bad token, wrong role).
  #[error("{0}")]
  Forbidden(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  InsufficientStock(String),

  /// Duplicate username. Answered with 400 like other bad input.
  #[error("{0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(format!("{:#}", err))
  }
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    let message = err.to_string();
    match err {
      StoreError::ProductNotFound { .. } | StoreError::CartNotFound { .. } | StoreError::CartLineNotFound { .. } => {
        AppError::NotFound(message)
      }
      StoreError::InsufficientStock { .. } => AppError::InsufficientStock(message),
      StoreError::UsernameTaken { .. } => AppError::Conflict(message),
      StoreError::Validation(_) => AppError::Validation(message),
    }
  }
}

/// Every checkout failure is the client's to fix, so all of them are 400s.
impl From<CheckoutError> for AppError {
  fn from(err: CheckoutError) -> Self {
    let message = err.to_string();
    match err {
      CheckoutError::InsufficientStock { .. } => AppError::InsufficientStock(message),
      CheckoutError::EmptyCart | CheckoutError::ProductNotFound { .. } | CheckoutError::TotalOverflow { .. } => {
        AppError::Validation(message)
      }
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::InsufficientStock(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }

    match self {
      AppError::Validation(m)
      | AppError::Auth(m)
      | AppError::Forbidden(m)
      | AppError::NotFound(m)
      | AppError::InsufficientStock(m)
      | AppError::Conflict(m) => HttpResponse::build(status).json(json!({"error": m})),
      AppError::Config(m) => HttpResponse::build(status).json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Workflow { source } => {
        tracing::error!(workflow_error_source = ?source, "Workflow error details");
        HttpResponse::build(status).json(json!({"error": "Workflow processing error", "detail": source.to_string()}))
      }
      AppError::Internal(m) => {
        HttpResponse::build(status).json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
