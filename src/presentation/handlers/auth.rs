use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};

use crate::application::ports::{ModelClient, PageRenderer, TextExtractor};
use crate::domain::{Identity, User};
use crate::presentation::state::AppState;

use super::ErrorResponse;

/// Resolves the bearer token to a caller identity and lazily upserts the
/// User row. Returns a ready 401 response when no identity can be
/// established.
pub async fn require_identity<M, X, R>(
    state: &AppState<M, X, R>,
    headers: &HeaderMap,
) -> Result<Identity, Response>
where
    M: ModelClient,
    X: TextExtractor,
    R: PageRenderer,
{
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");

    let identity = match state.identity_provider.resolve(token).await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            tracing::debug!("Request without valid caller identity");
            return Err(unauthorized());
        }
        Err(e) => {
            tracing::error!(error = %e, "Identity provider lookup failed");
            return Err(unauthorized());
        }
    };

    let user = User::from_identity(&identity);
    if let Err(e) = state.user_repository.upsert(&user).await {
        tracing::error!(error = %e, user_id = %user.id, "User upsert failed");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Server error")),
        )
            .into_response());
    }

    Ok(identity)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("Authentication required")),
    )
        .into_response()
}
