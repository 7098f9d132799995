use std::sync::Arc;

use crate::application::ports::{
    IdentityProvider, ModelClient, PageRenderer, SummaryRepository, TextExtractor, UserRepository,
};
use crate::application::services::SummarizationService;

pub struct AppState<M, X, R>
where
    M: ModelClient,
    X: TextExtractor,
    R: PageRenderer,
{
    pub summarization_service: Arc<SummarizationService<M, X, R>>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub summary_repository: Arc<dyn SummaryRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub history_limit: i64,
}

impl<M, X, R> Clone for AppState<M, X, R>
where
    M: ModelClient,
    X: TextExtractor,
    R: PageRenderer,
{
    fn clone(&self) -> Self {
        Self {
            summarization_service: Arc::clone(&self.summarization_service),
            identity_provider: Arc::clone(&self.identity_provider),
            summary_repository: Arc::clone(&self.summary_repository),
            user_repository: Arc::clone(&self.user_repository),
            history_limit: self.history_limit,
        }
    }
}
