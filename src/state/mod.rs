//! UI state driving which threads show flattened replies.

pub mod action;
pub mod expanded;

pub use action::{
    ActionDecodeError, ExpandedRepliesAction, EXPANDED_REPLIES_SET, EXPANDED_REPLIES_TOGGLE,
};
pub use expanded::ExpandedReplies;
