//! Reply-count labels for the expand toggle.

/// Formats the reply count shown on a thread's toggle.
///
/// Localized pluralization lives outside this crate; hosts plug their own
/// formatter in here.
pub trait ReplyLabel {
    /// Label for `count` replies.
    fn label(&self, count: usize) -> String;
}

/// English pluralization: `1 reply`, `3 replies`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishReplyLabel;

impl ReplyLabel for EnglishReplyLabel {
    fn label(&self, count: usize) -> String {
        match count {
            1 => "1 reply".to_string(),
            n => format!("{n} replies"),
        }
    }
}

impl<F> ReplyLabel for F
where
    F: Fn(usize) -> String,
{
    fn label(&self, count: usize) -> String {
        self(count)
    }
}
