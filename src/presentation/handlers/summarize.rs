use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};

use crate::application::ports::{ModelClient, ModelClientError, PageRenderer, TextExtractor};
use crate::application::services::{PdfUpload, SummarizeError};
use crate::domain::{EncodedImage, Summary};
use crate::infrastructure::text_processing::normalize_image;
use crate::presentation::handlers::auth::require_identity;
use crate::presentation::handlers::{ErrorResponse, OkResponse, SummaryData};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state, headers, multipart))]
pub async fn summarize_handler<M, X, R>(
    State(state): State<AppState<M, X, R>>,
    headers: HeaderMap,
    mut multipart: Multipart,
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

    let mut pdf: Option<PdfUpload> = None;
    let mut images: Vec<EncodedImage> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(format!("Failed to read upload: {e}"))),
                )
                    .into_response();
            }
        };

        match field.name().unwrap_or_default() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("document.pdf").to_string();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read pdf field");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse::new(format!("Failed to read pdf: {e}"))),
                        )
                            .into_response();
                    }
                };
                tracing::debug!(filename = %filename, bytes = bytes.len(), "PDF received");
                pdf = Some(PdfUpload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            "images" | "images[]" => {
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read image field");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse::new(format!("Failed to read image: {e}"))),
                        )
                            .into_response();
                    }
                };
                match normalize_image(&bytes) {
                    Ok(image) => images.push(image),
                    Err(e) => {
                        tracing::warn!(error = %e, "Uploaded image could not be decoded");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse::new("Uploaded image could not be read")),
                        )
                            .into_response();
                    }
                }
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let draft = match state.summarization_service.summarize(pdf, images).await {
        Ok(draft) => draft,
        Err(e) => return summarize_error_response(e),
    };

    let summary = Summary::new(
        identity.subject.clone(),
        draft.source,
        draft.title,
        draft.body,
        draft.keywords,
        draft.input_text,
        draft.pdf_name,
        draft.image_count,
    );

    if let Err(e) = state.summary_repository.insert(&summary).await {
        tracing::error!(error = %e, "Failed to persist summary");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Server error")),
        )
            .into_response();
    }

    tracing::info!(
        summary_id = %summary.id,
        source = summary.source.as_label(),
        "Summary persisted"
    );

    (
        StatusCode::OK,
        Json(OkResponse::new(SummaryData::from(&summary))),
    )
        .into_response()
}

fn summarize_error_response(error: SummarizeError) -> axum::response::Response {
    let (status, message) = match &error {
        SummarizeError::NoInput => (StatusCode::BAD_REQUEST, error.to_string()),
        SummarizeError::UnreadableScanned => (StatusCode::BAD_REQUEST, error.to_string()),
        SummarizeError::Model(ModelClientError::Overloaded { .. }) => {
            (StatusCode::SERVICE_UNAVAILABLE, error.to_string())
        }
        SummarizeError::Model(ModelClientError::MissingCredential) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
        SummarizeError::Model(_) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
        SummarizeError::Malformed(_) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
        SummarizeError::Extraction(_) | SummarizeError::Rendering(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    };

    tracing::warn!(status = %status, error = %message, "Summarization failed");
    (status, Json(ErrorResponse::new(message))).into_response()
}
