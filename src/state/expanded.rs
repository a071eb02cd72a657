//! Per-thread expand/collapse state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::action::ExpandedRepliesAction;
use crate::types::CommentId;

/// Which threads currently show their flattened replies.
///
/// Absent ids are collapsed. Owned by the host application's state
/// container and changed only through [`ExpandedRepliesAction`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandedReplies(BTreeMap<CommentId, bool>);

impl ExpandedReplies {
    /// Create an empty state (every thread collapsed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: &CommentId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Pure reducer: consume the state and return the next one.
    pub fn reduce(mut self, action: &ExpandedRepliesAction) -> Self {
        self.apply(action);
        self
    }

    /// Apply an action in place.
    pub fn apply(&mut self, action: &ExpandedRepliesAction) {
        match action {
            ExpandedRepliesAction::Set { id, expanded } => {
                self.0.insert(id.clone(), *expanded);
            }
            ExpandedRepliesAction::Toggle { id } => {
                let expanded = !self.is_expanded(id);
                self.0.insert(id.clone(), expanded);
            }
            ExpandedRepliesAction::Other => return,
        }
        tracing::trace!(?action, "Applied expanded-replies action");
    }

    /// Apply a sequence of actions in dispatch order.
    pub fn apply_all<'a, I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = &'a ExpandedRepliesAction>,
    {
        for action in actions {
            self.apply(action);
        }
    }

    /// Number of threads with an explicit entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no thread has an explicit entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Explicit entries, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&CommentId, bool)> {
        self.0.iter().map(|(id, expanded)| (id, *expanded))
    }
}
