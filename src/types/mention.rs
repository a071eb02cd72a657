//! Mention targets for replies-to-replies.

use serde::{Deserialize, Serialize};

use super::comment::User;

/// Author a flattened reply was directed at.
///
/// Only produced when the reply's parent is not the thread root, so a
/// flattened list can still show who each reply answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Parent author's display name.
    pub author_name: String,
    /// Parent author's identity.
    pub author_id: String,
    /// Parent author's avatar URL.
    pub author_picture: String,
}

impl From<&User> for Mention {
    fn from(user: &User) -> Self {
        Self {
            author_name: user.name.clone(),
            author_id: user.id.clone(),
            author_picture: user.picture.clone(),
        }
    }
}
