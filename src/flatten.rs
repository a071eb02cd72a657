//! Chronological reply flattening.
//!
//! A thread's nested replies are collected depth-first and then sorted once,
//! oldest first. Pre-order position only matters between replies with equal
//! timestamps, since the sort is stable.

use crate::store::CommentGraph;
use crate::types::CommentId;
use crate::walk::Descendants;

/// Every transitive descendant of `root`, ordered by creation time.
///
/// No filtering is applied: hidden comments and dangling ids are included.
/// Missing or unparsable times sort as the epoch.
pub fn flatten_replies<G: CommentGraph + ?Sized>(graph: &G, root: &CommentId) -> Vec<CommentId> {
    let mut keyed: Vec<(i64, &CommentId)> = Descendants::new(graph, root)
        .map(|id| {
            let time = graph.comment(id).map(|c| c.timestamp_millis()).unwrap_or(0);
            (time, id)
        })
        .collect();

    keyed.sort_by_key(|(time, _)| *time);

    keyed.into_iter().map(|(_, id)| id.clone()).collect()
}
