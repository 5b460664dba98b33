//! CommentGuard Core
//!
//! Core types and utilities shared across CommentGuard components.
//!
//! This crate provides:
//! - Error types and result handling
//! - Comment and video records as delivered by a comment source

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{RawComment, VideoInfo};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{RawComment, VideoInfo};
}
