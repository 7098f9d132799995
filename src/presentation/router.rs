use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ModelClient, PageRenderer, TextExtractor};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    delete_summary_handler, health_handler, history_handler, summarize_handler,
};
use crate::presentation::state::AppState;

/// Uploads carry whole PDFs plus images; axum's 2 MB default is too small.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn create_router<M, X, R>(state: AppState<M, X, R>) -> Router
where
    M: ModelClient + 'static,
    X: TextExtractor + 'static,
    R: PageRenderer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/summarize", post(summarize_handler::<M, X, R>))
        .route("/history", get(history_handler::<M, X, R>))
        .route("/summary/{id}", delete(delete_summary_handler::<M, X, R>))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
