use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};

use crate::application::ports::{ModelClient, PageRenderer, TextExtractor};
use crate::presentation::handlers::auth::require_identity;
use crate::presentation::handlers::{ErrorResponse, OkResponse, SummaryData};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state, headers))]
pub async fn history_handler<M, X, R>(
    State(state): State<AppState<M, X, R>>,
    headers: HeaderMap,
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
        .list_recent(&identity.subject, state.history_limit)
        .await
    {
        Ok(summaries) => {
            tracing::debug!(count = summaries.len(), "History fetched");
            let data: Vec<SummaryData> = summaries.iter().map(SummaryData::from).collect();
            (StatusCode::OK, Json(OkResponse::new(data))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list summaries");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error")),
            )
                .into_response()
        }
    }
}
