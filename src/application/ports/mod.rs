mod identity_provider;
mod model_client;
mod page_renderer;
mod repository_error;
mod summary_repository;
mod text_extractor;
mod user_repository;

pub use identity_provider::{IdentityError, IdentityProvider};
pub use model_client::{ContentPart, ModelClient, ModelClientError};
pub use page_renderer::{PageRenderer, RendererError};
pub use repository_error::RepositoryError;
pub use summary_repository::SummaryRepository;
pub use text_extractor::{ExtractorError, TextExtractor};
pub use user_repository::UserRepository;
