use std::sync::Arc;

use aide::{
    axum::{routing::get, ApiRouter, IntoApiResponse},
    openapi::OpenApi,
    redoc::Redoc,
    transform::TransformOpenApi,
};
use axum::{response::IntoResponse, Extension, Json};

use crate::state::AppState;

pub fn docs_routes() -> ApiRouter<AppState> {
    aide::gen::infer_responses(true);

    let router = ApiRouter::new()
        .route(
            "/docs",
            Redoc::new("/api.json")
                .with_title("Mood Notes")
                .axum_route(),
        )
        .route("/api.json", get(serve_docs));

    aide::gen::infer_responses(false);

    router
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api.as_ref()).into_response()
}

pub fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Mood Notes")
        .summary("Server-rendered mood note journal")
        .description("Create, list, edit and delete short mood notes. Edits are version-checked.")
}
