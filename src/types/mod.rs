//! Core types for flattened threads.

pub mod comment;
pub mod mention;

pub use comment::{Comment, CommentId, User, parse_time_millis};
pub use mention::Mention;
