use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{ModelClient, PageRenderer, TextExtractor};
use crate::domain::SummaryId;
use crate::presentation::handlers::auth::require_identity;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[tracing::instrument(skip(state, headers))]
pub async fn delete_summary_handler<M, X, R>(
    State(state): State<AppState<M, X, R>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> impl IntoResponse
where
    M: ModelClient + 'static,
    X: TextExtractor + 'static,
    R: PageRenderer + 'static,
{
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    match state
        .summary_repository
        .delete_owned(SummaryId::from_uuid(id), &identity.subject)
        .await
    {
        Ok(true) => {
            tracing::info!(summary_id = %id, "Summary deleted");
            (StatusCode::OK, Json(DeleteResponse { success: true })).into_response()
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Summary not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error")),
            )
                .into_response()
        }
    }
}
