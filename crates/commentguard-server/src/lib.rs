//! CommentGuard Server
//!
//! HTTP service that fetches a video's comments from YouTube, classifies
//! each one with the loaded TF-IDF + logistic regression model, and returns
//! the annotated comments with a summary report.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;
pub mod video_id;
pub mod youtube;

pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
pub use youtube::{CommentSource, SourceError, YouTubeClient};
