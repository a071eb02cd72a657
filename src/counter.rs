//! Descendant reply counting.

use crate::store::CommentGraph;
use crate::types::CommentId;
use crate::walk::Descendants;

/// Count every transitive descendant of `id` (not `id` itself).
///
/// Hidden comments are counted. Dangling child ids count as one reply each
/// and contribute no further descendants unless the index lists some.
/// An id with no child entry has zero replies.
pub fn count_replies<G: CommentGraph + ?Sized>(graph: &G, id: &CommentId) -> usize {
    Descendants::new(graph, id).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use crate::store::CommentSnapshot;
    use crate::types::{Comment, User};

    #[test]
    fn test_count_nested() {
        let user = User::default();
        let snapshot = CommentSnapshot::from_comments([
            Comment::new("a", "", user.clone()),
            Comment::reply("b", "a", "", user.clone()),
            Comment::reply("c", "a", "", user.clone()),
            Comment::reply("d", "c", "", user.clone()),
            Comment::reply("e", "d", "", user.clone()).with_hidden(true),
        ]);

        assert_eq!(count_replies(&snapshot, &CommentId::from("a")), 4);
        assert_eq!(count_replies(&snapshot, &CommentId::from("c")), 2);
        assert_eq!(count_replies(&snapshot, &CommentId::from("e")), 0);
        assert_eq!(count_replies(&snapshot, &CommentId::from("nope")), 0);
    }

    #[test]
    fn test_count_includes_dangling_child() {
        let mut comments = BTreeMap::new();
        comments.insert(CommentId::from("a"), Comment::new("a", "", User::default()));
        let mut index = BTreeMap::new();
        index.insert(CommentId::from("a"), vec![CommentId::from("ghost")]);
        let snapshot = CommentSnapshot::from_parts(comments, index);

        assert_eq!(count_replies(&snapshot, &CommentId::from("a")), 1);
    }

    #[test]
    fn test_count_deep_chain() {
        let user = User::default();
        let mut snapshot = CommentSnapshot::new();
        snapshot.insert(Comment::new("0", "", user.clone()));
        for i in 1..100_000 {
            snapshot.insert(Comment::reply(i.to_string(), (i - 1).to_string(), "", user.clone()));
        }

        assert_eq!(count_replies(&snapshot, &CommentId::from("0")), 99_999);
    }
}
