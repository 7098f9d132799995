mod auth;
mod delete_summary;
mod health;
mod history;
mod responses;
mod summarize;

pub use delete_summary::{delete_summary_handler, DeleteResponse};
pub use health::health_handler;
pub use history::history_handler;
pub use responses::{ErrorResponse, OkResponse, SummaryData};
pub use summarize::summarize_handler;
