//! In-memory comment snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::types::{Comment, CommentId};
use super::{CommentGraph, GraphVersion};

/// Error type for loading snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Snapshot JSON could not be parsed.
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Snapshot file could not be read.
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Snapshot of the comment store.
///
/// Uses BTreeMap for deterministic iteration order. Child lists keep the
/// order in which they were supplied.
#[derive(Debug, Clone, Default)]
pub struct CommentSnapshot {
    /// Comments by id.
    comments: BTreeMap<CommentId, Comment>,
    /// Parent -> ordered children.
    child_index: BTreeMap<CommentId, Vec<CommentId>>,
    /// Top-level comment ids in display order.
    roots: Vec<CommentId>,
    /// Lazily computed fingerprint, reset on mutation.
    version: OnceLock<GraphVersion>,
}

/// Wire form of a snapshot, as kept by the comment store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(deserialize_with = "deserialize_in_order")]
    all_comments: Vec<(CommentId, Comment)>,
    #[serde(default, alias = "childIndex")]
    child_comments: Option<BTreeMap<CommentId, Vec<CommentId>>>,
    #[serde(default)]
    top_comments: Option<Vec<CommentId>>,
}

/// Keep `allComments` entries in document order; it decides sibling and
/// root order when no child index is supplied.
fn deserialize_in_order<'de, D>(deserializer: D) -> Result<Vec<(CommentId, Comment)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(CommentId, Comment)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of comments by id")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

impl CommentSnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from the store's two maps.
    ///
    /// Top-level comments are ordered by id. Child ids need not exist in
    /// `comments`; dangling references are kept as given.
    pub fn from_parts(
        comments: BTreeMap<CommentId, Comment>,
        child_index: BTreeMap<CommentId, Vec<CommentId>>,
    ) -> Self {
        let roots = comments
            .values()
            .filter(|c| c.is_top_level())
            .map(|c| c.id.clone())
            .collect();

        Self {
            comments,
            child_index,
            roots,
            version: OnceLock::new(),
        }
    }

    /// Build a snapshot from comments, deriving the child index from `pid`.
    ///
    /// Children and roots keep iteration order.
    pub fn from_comments<I>(comments: I) -> Self
    where
        I: IntoIterator<Item = Comment>,
    {
        let mut snapshot = Self::new();
        for comment in comments {
            snapshot.insert(comment);
        }
        snapshot
    }

    /// Parse the store's JSON form.
    ///
    /// Expects `allComments`; `childComments` (or `childIndex`) and
    /// `topComments` are optional and derived from `pid` when missing,
    /// following the order of `allComments`.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse the store's JSON form from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_reader(reader)?;
        Ok(Self::from_raw(raw))
    }

    /// Load a snapshot JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn from_raw(raw: RawSnapshot) -> Self {
        let mut snapshot = match raw.child_comments {
            Some(child_index) => {
                let roots = raw
                    .all_comments
                    .iter()
                    .filter(|(_, c)| c.is_top_level())
                    .map(|(id, _)| id.clone())
                    .collect();
                Self {
                    comments: raw.all_comments.into_iter().collect(),
                    child_index,
                    roots,
                    version: OnceLock::new(),
                }
            }
            None => Self::from_comments(raw.all_comments.into_iter().map(|(_, c)| c)),
        };
        if let Some(roots) = raw.top_comments {
            snapshot.roots = roots;
        }
        snapshot
    }

    /// Add a comment, appending it to its parent's child list.
    ///
    /// Re-inserting an existing id replaces the comment. Its position is
    /// kept unless `pid` changed, in which case it moves to the end of the
    /// new parent's child list.
    pub fn insert(&mut self, comment: Comment) {
        let id = comment.id.clone();
        let pid = comment.pid.clone();
        match self.comments.insert(id.clone(), comment) {
            Some(previous) if previous.pid == pid => {}
            Some(previous) => {
                tracing::debug!(comment_id = %id, "Comment moved to a new parent");
                self.detach(&id, previous.pid.as_ref());
                self.attach(id, pid);
            }
            None => self.attach(id, pid),
        }
        self.version = OnceLock::new();
    }

    fn attach(&mut self, id: CommentId, pid: Option<CommentId>) {
        match pid {
            Some(pid) => self.child_index.entry(pid).or_default().push(id),
            None => self.roots.push(id),
        }
    }

    fn detach(&mut self, id: &CommentId, pid: Option<&CommentId>) {
        match pid {
            Some(pid) => {
                if let Some(children) = self.child_index.get_mut(pid) {
                    children.retain(|child| child != id);
                    if children.is_empty() {
                        self.child_index.remove(pid);
                    }
                }
            }
            None => self.roots.retain(|root| root != id),
        }
    }

    /// Fingerprint of the current contents.
    pub fn graph_version(&self) -> GraphVersion {
        *self.version.get_or_init(|| GraphVersion::compute(self))
    }

    /// Top-level comment ids in display order.
    pub fn roots(&self) -> &[CommentId] {
        &self.roots
    }

    /// All comments, ordered by id.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.values()
    }

    /// Comments with the key they are stored under, ordered by key.
    pub fn entries(&self) -> impl Iterator<Item = (&CommentId, &Comment)> {
        self.comments.iter()
    }

    /// The child index, ordered by parent id.
    pub fn child_index(&self) -> &BTreeMap<CommentId, Vec<CommentId>> {
        &self.child_index
    }

    /// Number of comments.
    pub fn num_comments(&self) -> usize {
        self.comments.len()
    }

    /// Whether the snapshot holds no comments.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl CommentGraph for CommentSnapshot {
    fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.get(id)
    }

    fn children(&self, id: &CommentId) -> &[CommentId] {
        self.child_index.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn version(&self) -> Option<GraphVersion> {
        Some(self.graph_version())
    }
}
