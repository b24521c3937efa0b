use aide::{
    axum::{routing::get_with, ApiRouter, IntoApiResponse},
    transform::TransformOperation,
};
use axum::http::StatusCode;

use crate::state::AppState;

pub fn health_routes() -> ApiRouter<AppState> {
    ApiRouter::new().api_route("/health/ping", get_with(ping, ping_docs))
}

pub async fn ping() -> impl IntoApiResponse {
    StatusCode::OK
}

pub fn ping_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health check")
        .description("Health check endpoint")
        .tag("Health")
        .response::<200, ()>() // Simple 200 OK response with no body
}
