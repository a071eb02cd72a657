//! Read-only access to comment graph snapshots.

pub mod memory;
pub mod version;

use crate::types::{Comment, CommentId};

/// Read-only view over a comment forest.
///
/// Combines the two maps maintained by the comment store: every comment by
/// id, and the ordered list of immediate children per id. Implementations
/// must behave as one consistent snapshot for the duration of a call.
pub trait CommentGraph {
    /// Fetch a comment by id. `None` for dangling references.
    fn comment(&self, id: &CommentId) -> Option<&Comment>;

    /// Immediate child ids of `id`, in store order. Empty when absent.
    fn children(&self, id: &CommentId) -> &[CommentId];

    /// Version of the snapshot, if the backend tracks one.
    ///
    /// Memoized results are only reused for graphs that report a version.
    fn version(&self) -> Option<GraphVersion> {
        None
    }
}

impl<G: CommentGraph + ?Sized> CommentGraph for &G {
    fn comment(&self, id: &CommentId) -> Option<&Comment> {
        (**self).comment(id)
    }

    fn children(&self, id: &CommentId) -> &[CommentId] {
        (**self).children(id)
    }

    fn version(&self) -> Option<GraphVersion> {
        (**self).version()
    }
}

pub use memory::{CommentSnapshot, SnapshotError};
pub use version::GraphVersion;
