//! # flat-thread
//!
//! Flattened comment threads for two-level discussion views.
//!
//! A flattened thread shows each top-level comment with the count of *all*
//! its nested replies. When expanded, those replies appear as one list,
//! oldest first, one level deep, with a mention of the author each reply
//! answered whenever that author is not the root.
//!
//! ## Core Contract
//!
//! 1. [`count_replies`]: every transitive descendant of a comment, hidden ones included
//! 2. [`flatten_replies`]: the same descendants, stably sorted by creation time
//! 3. [`resolve_mention`]: the parent author of a reply-to-reply
//! 4. [`ExpandedReplies`]: per-thread expand/collapse flags driven by [`ExpandedRepliesAction`]s
//!
//! ## Architecture
//!
//! ```text
//! CommentSnapshot ──► count_replies ──┐
//!        │                            ├─► ThreadComposer ─► ThreadView
//!        └──────────► flatten_replies ┤
//!                     resolve_mention ┘
//!                                     ▲
//! ExpandedRepliesAction ─► ExpandedReplies
//! ```
//!
//! ## Robustness
//!
//! - Dangling ids never fail: they count, flatten, and resolve to "no mention"
//! - Unparsable times sort as the Unix epoch
//! - Traversal is iterative, so deep reply chains do not grow the call stack

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod store;
pub mod walk;
pub mod counter;
pub mod flatten;
pub mod resolver;
pub mod state;
pub mod cache;
pub mod label;
pub mod policy;
pub mod thread;

// Re-exports
pub use types::{Comment, CommentId, User, Mention, parse_time_millis};
pub use store::{CommentGraph, CommentSnapshot, SnapshotError, GraphVersion};
pub use walk::Descendants;
pub use counter::count_replies;
pub use flatten::flatten_replies;
pub use resolver::resolve_mention;
pub use state::{
    ExpandedReplies, ExpandedRepliesAction, ActionDecodeError,
    EXPANDED_REPLIES_SET, EXPANDED_REPLIES_TOGGLE,
};
pub use cache::{CacheConfig, CacheStats, ThreadCache};
pub use label::{ReplyLabel, EnglishReplyLabel};
pub use policy::{ThreadPolicy, PolicyError};
pub use thread::{ThreadComposer, ThreadView, FlatReply, REPLY_LEVEL};

/// Schema version for graph fingerprints.
/// Increment on changes to what [`GraphVersion`] hashes.
pub const FLAT_THREAD_SCHEMA_VERSION: &str = "1.0.0";

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "thread_policy_v1";
