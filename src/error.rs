use std::time::Duration;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::database::StoreError;
use crate::handlers::shared::ApiResponse;

/// Failures of the scheduling and directory services.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Team {0} not found")]
    TeamNotFound(i64),

    #[error("Person {person_id} not found in team {team_id}")]
    PersonNotFound { person_id: i64, team_id: i64 },

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("{field} invalid format: {value} (expected YYYY-MM-DD)")]
    InvalidDateFormat { field: &'static str, value: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage did not answer within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Inconsistent state: {0}")]
    Inconsistent(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error")]
    DatabaseError(StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    InternalServerError(Option<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        match self {
            AppError::DatabaseError(source) => {
                log::error!("Request failed with status {}: {}", status_code, source)
            }
            _ if status_code.is_server_error() => {
                log::error!("Request failed with status {}: {}", status_code, error_message)
            }
            _ => log::debug!("Request rejected with status {}: {}", status_code, error_message),
        }

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(&error_message))
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        AppError::DatabaseError(error)
    }
}

impl From<ServiceError> for AppError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::TeamNotFound(_) | ServiceError::PersonNotFound { .. } => {
                AppError::NotFound(error.to_string())
            }
            ServiceError::InvalidDateFormat { .. } | ServiceError::InvalidInput(_) => {
                AppError::BadRequest(error.to_string())
            }
            ServiceError::Timeout(after) => {
                log::warn!("Request aborted after {:?}", after);
                AppError::Timeout
            }
            ServiceError::Store(source) => AppError::DatabaseError(source),
            ServiceError::InvalidTimezone(_) | ServiceError::Inconsistent(_) => {
                AppError::internal_server_error_message(error.to_string())
            }
        }
    }
}

impl AppError {
    pub fn internal_server_error_message(message: impl Into<String>) -> Self {
        AppError::InternalServerError(Some(message.into()))
    }
}
