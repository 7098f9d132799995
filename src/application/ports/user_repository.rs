use async_trait::async_trait;

use crate::domain::User;

use super::RepositoryError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user or refreshes email/display name if the row exists.
    async fn upsert(&self, user: &User) -> Result<(), RepositoryError>;
}
