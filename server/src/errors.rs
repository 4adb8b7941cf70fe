// server/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use storefront::CartError;
use thiserror::Error;

/// The only failure text clients ever see for a cart request.
pub const GENERIC_FAILURE_MESSAGE: &str = "Your request could not be processed. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Cart operation failed: {0}")]
  Cart(#[from] CartError),

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Database(#[from] sqlx::Error),
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      _ => StatusCode::BAD_REQUEST,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error; the client only gets the flattened message.
    match self {
      AppError::Auth(m) => {
        tracing::warn!(application_error = %self, "Rejecting unauthenticated request");
        HttpResponse::Unauthorized().json(json!({"error": m}))
      }
      AppError::Cart(source) => {
        tracing::error!(application_error = %self, operation = ?source.operation(), "Responding with error");
        HttpResponse::BadRequest().json(json!({"error": GENERIC_FAILURE_MESSAGE}))
      }
      _ => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::BadRequest().json(json!({"error": GENERIC_FAILURE_MESSAGE}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
