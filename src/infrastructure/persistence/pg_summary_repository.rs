use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, SummaryRepository};
use crate::domain::{SourceKind, Summary, SummaryId};

pub struct PgSummaryRepository {
    pool: PgPool,
}

impl PgSummaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_summary(row: &sqlx::postgres::PgRow) -> Result<Summary, RepositoryError> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let source_str: String = row
            .try_get("source")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let source: SourceKind = source_str
            .parse()
            .map_err(RepositoryError::CorruptRow)?;
        let title: String = row
            .try_get("title")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let body: String = row
            .try_get("summary")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let keywords_json: serde_json::Value = row
            .try_get("keywords")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let input_text: Option<String> = row
            .try_get("input_text")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let pdf_name: Option<String> = row
            .try_get("pdf_name")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let image_count: Option<i32> = row
            .try_get("image_count")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| RepositoryError::CorruptRow(e.to_string()))?;

        Ok(Summary {
            id: SummaryId::from_uuid(id),
            user_id,
            source,
            title,
            body,
            keywords: normalize_keywords(keywords_json),
            input_text,
            pdf_name,
            image_count,
            created_at,
        })
    }
}

/// Keywords live in a JSONB column; anything that is not a string array is
/// reduced to its string members so callers never see raw JSON.
fn normalize_keywords(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl SummaryRepository for PgSummaryRepository {
    #[instrument(skip(self, summary), fields(summary_id = %summary.id))]
    async fn insert(&self, summary: &Summary) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO summaries
                (id, user_id, source, title, summary, keywords, input_text,
                 pdf_name, image_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(summary.id.as_uuid())
        .bind(&summary.user_id)
        .bind(summary.source.as_str())
        .bind(&summary.title)
        .bind(&summary.body)
        .bind(serde_json::Value::from(summary.keywords.clone()))
        .bind(&summary.input_text)
        .bind(&summary.pdf_name)
        .bind(summary.image_count)
        .bind(summary.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recent(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Summary>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, source, title, summary, keywords, input_text,
                   pdf_name, image_count, created_at
            FROM summaries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.iter().map(Self::row_to_summary).collect()
    }

    #[instrument(skip(self), fields(summary_id = %id))]
    async fn delete_owned(
        &self,
        id: SummaryId,
        user_id: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM summaries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_normalization_drops_non_string_entries() {
        let value = serde_json::json!(["a", 1, null, "b"]);
        assert_eq!(normalize_keywords(value), vec!["a", "b"]);
    }

    #[test]
    fn non_array_keyword_json_becomes_empty() {
        assert!(normalize_keywords(serde_json::json!("oops")).is_empty());
        assert!(normalize_keywords(serde_json::Value::Null).is_empty());
    }
}
