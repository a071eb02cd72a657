//! Graph version fingerprints.
//!
//! A `GraphVersion` identifies the exact state of a [`CommentSnapshot`] so
//! memoized counts and flattened lists can be keyed by it. Any change to a
//! comment's parent, time or hidden flag, or to the order of a child list,
//! yields a different version.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh64::Xxh64;

use super::memory::CommentSnapshot;
use crate::FLAT_THREAD_SCHEMA_VERSION;

/// Deterministic fingerprint of a comment snapshot (xxh64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphVersion(u64);

impl GraphVersion {
    /// Wrap a precomputed fingerprint.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Compute the version of a snapshot.
    ///
    /// Comments (with their storage keys) and the child index are hashed in
    /// id order, so two snapshots holding the same data agree regardless of
    /// how they were built.
    pub fn compute(snapshot: &CommentSnapshot) -> Self {
        let mut hasher = Xxh64::new(0);
        write_field(&mut hasher, FLAT_THREAD_SCHEMA_VERSION.as_bytes());

        for (key, comment) in snapshot.entries() {
            write_field(&mut hasher, key.as_str().as_bytes());
            write_field(&mut hasher, comment.id.as_str().as_bytes());
            write_field(
                &mut hasher,
                comment.pid.as_ref().map(|p| p.as_str()).unwrap_or("").as_bytes(),
            );
            write_field(&mut hasher, comment.time.as_bytes());
            hasher.update(&[u8::from(comment.hidden)]);
            write_field(&mut hasher, comment.user.id.as_bytes());
            write_field(&mut hasher, comment.user.name.as_bytes());
            write_field(&mut hasher, comment.user.picture.as_bytes());
        }

        for (parent, children) in snapshot.child_index() {
            write_field(&mut hasher, parent.as_str().as_bytes());
            hasher.update(&(children.len() as u64).to_le_bytes());
            for child in children {
                write_field(&mut hasher, child.as_str().as_bytes());
            }
        }

        Self(hasher.digest())
    }

    /// Raw fingerprint value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

// Length-prefixed so adjacent fields cannot run together.
fn write_field(hasher: &mut Xxh64, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
