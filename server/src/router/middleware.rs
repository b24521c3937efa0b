use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::{InternalCause, RestError};

/// Logs internal errors with the request method and URI, and gives bare
/// router rejections (405 from method routing) the same error page as the
/// rest of the app.
pub async fn handle_error_responses(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    if let Some(InternalCause(cause)) = response.extensions().get::<InternalCause>() {
        error!(%method, %uri, error = %cause, "internal server error");
    }

    let bare = !response.headers().contains_key(header::CONTENT_TYPE);
    if response.status() == StatusCode::METHOD_NOT_ALLOWED && bare {
        let mut page = RestError::MethodNotAllowed.into_response();
        if let Some(allow) = response.headers().get(header::ALLOW) {
            page.headers_mut().insert(header::ALLOW, allow.clone());
        }
        return page;
    }

    response
}

pub async fn fallback() -> Response {
    RestError::NotFound.into_response()
}
