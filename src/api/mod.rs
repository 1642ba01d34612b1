pub mod client;
pub mod files;
pub mod images;
pub mod types;
pub mod url;

pub use client::{ApiError, ApiResponse, FigmaClient};
pub use images::NodeImageRequest;
pub use url::FigmaUrl;
