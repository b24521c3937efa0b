use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use moodnotes_core::StoreError;
use thiserror::Error;

use crate::render::{render, Page};

/// Start-up and serving failures
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Environment variable {1} is not set: {0}")]
    EnvError(std::env::VarError, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Cannot serve: {0}")]
    CannotServe(std::io::Error),

    #[error("{0}")]
    Internal(String),
}

pub type RestResult<T> = Result<T, RestError>;

/// Request failures that end in an error page
#[derive(Debug, Error)]
pub enum RestError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request")]
    BadRequest,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Cause of a 500, attached to the response for the logging middleware.
/// Never written to the body.
#[derive(Debug, Clone)]
pub struct InternalCause(pub String);

impl From<StoreError> for RestError {
    fn from(error: StoreError) -> Self {
        if error.is_not_found() {
            RestError::NotFound
        } else {
            RestError::Internal(error.to_string())
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match self {
            RestError::NotFound => render(StatusCode::NOT_FOUND, Page::Error),
            RestError::BadRequest => render(StatusCode::BAD_REQUEST, Page::Error),
            RestError::MethodNotAllowed => {
                let mut response = render(StatusCode::METHOD_NOT_ALLOWED, Page::Error);
                response
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("POST"));
                response
            }
            RestError::Internal(cause) => {
                let mut response = render(StatusCode::INTERNAL_SERVER_ERROR, Page::Error);
                response.extensions_mut().insert(InternalCause(cause));
                response
            }
        }
    }
}
