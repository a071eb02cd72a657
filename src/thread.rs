//! Thread composition.
//!
//! Combines reply counting, flattening, mention resolution and the
//! expanded-replies state into the model a renderer draws for one
//! top-level comment.
//!
//! ## Composition
//!
//! ```text
//! root ─► count_replies ─► label
//!   │
//!   └─ expanded && count > 0 ─► flatten_replies ─► drop hidden/dangling ─► resolve_mention
//! ```
//!
//! Every reply in the result sits exactly one level below the root,
//! whatever its depth in the original tree.

use std::sync::Arc;

use serde::Serialize;

use crate::cache::{CacheStats, ThreadCache};
use crate::counter::count_replies;
use crate::flatten::flatten_replies;
use crate::label::{EnglishReplyLabel, ReplyLabel};
use crate::policy::ThreadPolicy;
use crate::resolver::resolve_mention;
use crate::state::ExpandedReplies;
use crate::store::{CommentGraph, CommentSnapshot};
use crate::types::{Comment, CommentId, Mention};

/// Display level of every flattened reply.
pub const REPLY_LEVEL: u32 = 1;

/// One reply in an expanded thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatReply {
    /// Reply id.
    pub id: CommentId,
    /// The reply itself.
    pub comment: Comment,
    /// Author being answered, when that is not the thread root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention: Option<Mention>,
    /// Always [`REPLY_LEVEL`].
    pub level: u32,
}

/// Render model for one top-level comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadView {
    /// The top-level comment.
    pub root: Comment,
    /// All nested replies, hidden ones included.
    pub reply_count: usize,
    /// Toggle label, present when there is at least one reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Expanded flag from the state store.
    pub expanded: bool,
    /// Flattened replies, oldest first. Empty unless expanded.
    pub replies: Vec<FlatReply>,
}

impl ThreadView {
    /// Whether the flattened replies are shown.
    pub fn shows_replies(&self) -> bool {
        self.expanded && self.reply_count > 0
    }
}

/// Composes [`ThreadView`]s from a comment graph and the expanded state.
pub struct ThreadComposer<L = EnglishReplyLabel> {
    policy: ThreadPolicy,
    cache: ThreadCache,
    label: L,
}

impl ThreadComposer<EnglishReplyLabel> {
    /// Create a composer with English labels.
    pub fn new(policy: ThreadPolicy) -> Self {
        Self::with_label(policy, EnglishReplyLabel)
    }
}

impl Default for ThreadComposer<EnglishReplyLabel> {
    fn default() -> Self {
        Self::new(ThreadPolicy::default())
    }
}

impl<L: ReplyLabel> ThreadComposer<L> {
    /// Create a composer with a custom label formatter.
    pub fn with_label(policy: ThreadPolicy, label: L) -> Self {
        let cache = ThreadCache::new(&policy.cache);
        Self { policy, cache, label }
    }

    /// Compose the thread rooted at `root`.
    ///
    /// Returns `None` when the root is missing or hidden.
    pub fn compose<G: CommentGraph + ?Sized>(
        &self,
        graph: &G,
        expanded: &ExpandedReplies,
        root: &CommentId,
    ) -> Option<ThreadView> {
        let Some(root_comment) = graph.comment(root) else {
            tracing::warn!(root = %root, "Thread root not found in snapshot");
            return None;
        };
        if root_comment.hidden {
            tracing::debug!(root = %root, "Skipping hidden thread root");
            return None;
        }

        let reply_count = self.reply_count(graph, root);
        let is_expanded = expanded.is_expanded(root);

        let replies = if is_expanded && reply_count > 0 {
            self.flat_replies(graph, root)
        } else {
            Vec::new()
        };

        tracing::debug!(
            root = %root,
            reply_count,
            expanded = is_expanded,
            shown = replies.len(),
            "Composed thread"
        );

        Some(ThreadView {
            root: root_comment.clone(),
            reply_count,
            label: (reply_count > 0).then(|| self.label.label(reply_count)),
            expanded: is_expanded,
            replies,
        })
    }

    /// Compose every top-level thread of a snapshot, in display order.
    pub fn compose_all(&self, snapshot: &CommentSnapshot, expanded: &ExpandedReplies) -> Vec<ThreadView> {
        snapshot
            .roots()
            .iter()
            .filter_map(|root| self.compose(snapshot, expanded, root))
            .collect()
    }

    /// Reply count for `root`, memoized when the graph is versioned.
    pub fn reply_count<G: CommentGraph + ?Sized>(&self, graph: &G, root: &CommentId) -> usize {
        match graph.version() {
            Some(version) => self.cache.count_with(version, root, || count_replies(graph, root)),
            None => count_replies(graph, root),
        }
    }

    /// Flattened reply ids for `root`, memoized when the graph is versioned.
    pub fn flattened<G: CommentGraph + ?Sized>(&self, graph: &G, root: &CommentId) -> Arc<[CommentId]> {
        match graph.version() {
            Some(version) => self.cache.flattened_with(version, root, || flatten_replies(graph, root)),
            None => flatten_replies(graph, root).into(),
        }
    }

    fn flat_replies<G: CommentGraph + ?Sized>(&self, graph: &G, root: &CommentId) -> Vec<FlatReply> {
        self.flattened(graph, root)
            .iter()
            .filter_map(|id| {
                let Some(comment) = graph.comment(id) else {
                    tracing::trace!(root = %root, comment_id = %id, "Skipping dangling reply");
                    return None;
                };
                if comment.hidden && self.policy.skip_hidden {
                    return None;
                }
                Some(FlatReply {
                    id: id.clone(),
                    comment: comment.clone(),
                    mention: resolve_mention(graph, id, root),
                    level: REPLY_LEVEL,
                })
            })
            .collect()
    }

    /// Get the policy.
    pub fn policy(&self) -> &ThreadPolicy {
        &self.policy
    }

    /// Cache statistics, `None` when caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.stats()
    }

    /// Drop memoized results.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
