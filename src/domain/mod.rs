mod encoded_image;
mod summary;
mod user;

pub use encoded_image::EncodedImage;
pub use summary::{SourceKind, Summary, SummaryId};
pub use user::{Identity, User};
