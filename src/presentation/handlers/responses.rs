use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Summary;

/// Success envelope: `{ok: true, data: ...}`.
#[derive(Serialize)]
pub struct OkResponse<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

impl<T: Serialize> OkResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Failure envelope: `{ok: false, error: "..."}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Client view of a persisted summary. `source` carries the user-facing
/// label form (`pdf+image`), never the storage form.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub source: &'static str,
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_count: Option<i32>,
}

impl From<&Summary> for SummaryData {
    fn from(summary: &Summary) -> Self {
        Self {
            id: summary.id.to_string(),
            created_at: summary.created_at,
            source: summary.source.as_label(),
            title: summary.title.clone(),
            summary: summary.body.clone(),
            keywords: summary.keywords.clone(),
            pdf_name: summary.pdf_name.clone(),
            image_count: summary.image_count,
        }
    }
}
