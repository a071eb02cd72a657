//! Mention resolution for flattened replies.

use crate::store::CommentGraph;
use crate::types::{CommentId, Mention};

/// Resolve who a flattened reply was answering.
///
/// A reply to the thread root needs no mention. A reply to another reply
/// mentions that reply's author. Returns `None` when the reply, its parent
/// or the parent link is missing.
pub fn resolve_mention<G: CommentGraph + ?Sized>(
    graph: &G,
    reply_id: &CommentId,
    root_id: &CommentId,
) -> Option<Mention> {
    let reply = graph.comment(reply_id)?;
    let parent_id = reply.pid.as_ref()?;
    if parent_id == root_id {
        return None;
    }
    graph.comment(parent_id).map(|parent| Mention::from(&parent.user))
}
