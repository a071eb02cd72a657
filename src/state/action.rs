//! Actions consumed by the expanded-replies reducer.

use serde::{Deserialize, Serialize};

use crate::types::CommentId;

/// Wire tag for [`ExpandedRepliesAction::Set`].
pub const EXPANDED_REPLIES_SET: &str = "EXPANDED_REPLIES_SET";

/// Wire tag for [`ExpandedRepliesAction::Toggle`].
pub const EXPANDED_REPLIES_TOGGLE: &str = "EXPANDED_REPLIES_TOGGLE";

/// Error decoding an action from JSON.
#[derive(Debug, thiserror::Error)]
pub enum ActionDecodeError {
    /// Payload is not a well-formed action object.
    #[error("Malformed action: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Action dispatched to the expanded-replies state.
///
/// JSON form is internally tagged by `type`. Actions belonging to other
/// parts of the application decode as [`ExpandedRepliesAction::Other`] and
/// leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExpandedRepliesAction {
    /// Overwrite the expanded flag for a thread.
    #[serde(rename = "EXPANDED_REPLIES_SET")]
    Set {
        /// Root comment of the thread.
        id: CommentId,
        /// New flag value.
        expanded: bool,
    },
    /// Flip the expanded flag for a thread (absent counts as collapsed).
    #[serde(rename = "EXPANDED_REPLIES_TOGGLE")]
    Toggle {
        /// Root comment of the thread.
        id: CommentId,
    },
    /// Any action type not handled here.
    #[serde(other)]
    Other,
}

impl ExpandedRepliesAction {
    /// Build a `Set` action.
    pub fn set(id: impl Into<CommentId>, expanded: bool) -> Self {
        Self::Set {
            id: id.into(),
            expanded,
        }
    }

    /// Build a `Toggle` action.
    pub fn toggle(id: impl Into<CommentId>) -> Self {
        Self::Toggle { id: id.into() }
    }

    /// Decode an action from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ActionDecodeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Thread the action targets, if any.
    pub fn target(&self) -> Option<&CommentId> {
        match self {
            Self::Set { id, .. } | Self::Toggle { id } => Some(id),
            Self::Other => None,
        }
    }
}
