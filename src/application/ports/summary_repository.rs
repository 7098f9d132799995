use async_trait::async_trait;

use crate::domain::{Summary, SummaryId};

use super::RepositoryError;

#[async_trait]
pub trait SummaryRepository: Send + Sync {
    async fn insert(&self, summary: &Summary) -> Result<(), RepositoryError>;

    /// Most recent summaries for one user, newest first, bounded.
    async fn list_recent(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Summary>, RepositoryError>;

    /// Deletes the row only when it belongs to `user_id`. Returns whether
    /// a row was removed.
    async fn delete_owned(
        &self,
        id: SummaryId,
        user_id: &str,
    ) -> Result<bool, RepositoryError>;
}
