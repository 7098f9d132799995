mod pg_pool;
mod pg_summary_repository;
mod pg_user_repository;

pub use pg_pool::{create_pool, run_migrations};
pub use pg_summary_repository::PgSummaryRepository;
pub use pg_user_repository::PgUserRepository;
