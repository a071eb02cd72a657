//! Iterative depth-first traversal of reply subtrees.
//!
//! Uses an explicit work-stack so stack usage does not grow with comment
//! depth. Visits are pre-order: a child, then all of its descendants, then
//! its next sibling.

use std::collections::HashSet;

use crate::store::CommentGraph;
use crate::types::CommentId;

/// Pre-order iterator over every descendant of a root (root excluded).
///
/// Each id is yielded at most once. On a malformed graph containing a cycle
/// the revisited id is skipped and logged, so iteration always terminates.
pub struct Descendants<'g, G: CommentGraph + ?Sized> {
    graph: &'g G,
    root: &'g CommentId,
    stack: Vec<&'g CommentId>,
    visited: HashSet<&'g CommentId>,
}

impl<'g, G: CommentGraph + ?Sized> Descendants<'g, G> {
    /// Start a walk below `root`.
    pub fn new(graph: &'g G, root: &'g CommentId) -> Self {
        let mut walk = Self {
            graph,
            root,
            stack: Vec::new(),
            visited: HashSet::new(),
        };
        walk.visited.insert(root);
        walk.push_children(root);
        walk
    }

    fn push_children(&mut self, id: &'g CommentId) {
        let graph = self.graph;
        // Reversed so the first child is popped first.
        self.stack.extend(graph.children(id).iter().rev());
    }
}

impl<'g, G: CommentGraph + ?Sized> Iterator for Descendants<'g, G> {
    type Item = &'g CommentId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if !self.visited.insert(id) {
                tracing::warn!(
                    root = %self.root,
                    comment_id = %id,
                    "Comment reached twice while walking replies; graph is not a forest"
                );
                continue;
            }
            self.push_children(id);
            return Some(id);
        }
        None
    }
}
