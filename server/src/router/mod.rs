use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{middleware::from_fn, Extension, Router};
use health::health_routes;
use moodnotes_core::NoteStore;
use notes::note_routes;
use openapi::{api_docs, docs_routes};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

pub mod health;
pub mod middleware;
pub mod notes;
pub mod openapi;

pub fn setup_router(store: NoteStore, static_dir: &Path) -> Router {
    aide::gen::on_error(|error| {
        tracing::warn!("{error}");
    });

    aide::gen::extract_schemas(true);
    let mut api = OpenApi::default();

    let app_state = AppState::new(store);

    ApiRouter::new()
        .merge(note_routes())
        .merge(health_routes())
        .merge(docs_routes())
        .finish_api_with(&mut api, api_docs)
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(middleware::fallback)
        .layer(Extension(Arc::new(api)))
        .layer(from_fn(middleware::handle_error_responses))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
