//! Golden tests for flattened threads.
//!
//! These tests pin the end-to-end behavior of counting, flattening,
//! mention resolution and the expanded-replies reducer.

use std::collections::BTreeMap;

use flat_thread::{
    count_replies, flatten_replies, resolve_mention,
    Comment, CommentId, CommentSnapshot, User,
    ExpandedReplies, ExpandedRepliesAction,
    ThreadComposer, ThreadPolicy, REPLY_LEVEL,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn user(name: &str) -> User {
    User::new(format!("github_{name}"), name, format!("https://avatars/{name}.png"))
}

fn at(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

fn id(s: &str) -> CommentId {
    CommentId::from(s)
}

fn strs(ids: &[CommentId]) -> Vec<&str> {
    ids.iter().map(CommentId::as_str).collect()
}

/// A(root, t=100), B(pid=A, t=300), C(pid=A, t=200), D(pid=C, t=400)
fn reference_thread() -> CommentSnapshot {
    CommentSnapshot::from_comments([
        Comment::new("A", at(100), user("alice")),
        Comment::reply("B", "A", at(300), user("bob")),
        Comment::reply("C", "A", at(200), user("carol")),
        Comment::reply("D", "C", at(400), user("dave")),
    ])
}

fn build_branching_thread() -> CommentSnapshot {
    //            r
    //          / | \
    //         a  b  c
    //        / \     \
    //       a1  a2    c1
    //       |
    //       a11
    CommentSnapshot::from_comments([
        Comment::new("r", at(0), user("root")),
        Comment::reply("a", "r", at(10), user("ann")),
        Comment::reply("b", "r", at(50), user("ben")),
        Comment::reply("c", "r", at(20), user("cat")),
        Comment::reply("a1", "a", at(60), user("abe")),
        Comment::reply("a2", "a", at(15), user("amy")).with_hidden(true),
        Comment::reply("a11", "a1", at(70), user("ada")),
        Comment::reply("c1", "c", at(50), user("cal")),
    ])
}

// ─────────────────────────────────────────────────────────────────────────────
// REFERENCE SCENARIO
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_reference_scenario() {
    let snapshot = reference_thread();
    let a = id("A");

    assert_eq!(count_replies(&snapshot, &a), 3);
    assert_eq!(strs(&flatten_replies(&snapshot, &a)), vec!["C", "B", "D"]);
    assert_eq!(resolve_mention(&snapshot, &id("B"), &a), None);

    let mention = resolve_mention(&snapshot, &id("D"), &a).unwrap();
    assert_eq!(mention.author_name, "carol");
    assert_eq!(mention.author_id, "github_carol");
    assert_eq!(mention.author_picture, "https://avatars/carol.png");

    let state = ExpandedReplies::new().reduce(&ExpandedRepliesAction::toggle("A"));
    assert!(state.is_expanded(&a));
    let state = state.reduce(&ExpandedRepliesAction::toggle("A"));
    assert!(!state.is_expanded(&a));
}

// ─────────────────────────────────────────────────────────────────────────────
// FLATTENING
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_branching_flatten_order() {
    let snapshot = build_branching_thread();
    let flat = flatten_replies(&snapshot, &id("r"));

    // b and c1 share t=50; b is visited first in pre-order.
    assert_eq!(strs(&flat), vec!["a", "a2", "c", "b", "c1", "a1", "a11"]);
    assert_eq!(flat.len(), count_replies(&snapshot, &id("r")));
}

#[test]
fn test_subtree_flatten() {
    let snapshot = build_branching_thread();
    assert_eq!(strs(&flatten_replies(&snapshot, &id("a"))), vec!["a2", "a1", "a11"]);
    assert_eq!(count_replies(&snapshot, &id("a")), 3);
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let mut snapshot = CommentSnapshot::new();
    snapshot.insert(Comment::new("0", at(0), user("root")));
    for i in 1..200_000i64 {
        // Reverse chronological so the sort has real work to do.
        snapshot.insert(Comment::reply(i.to_string(), (i - 1).to_string(), at(1_000_000 - i), user("u")));
    }

    let flat = flatten_replies(&snapshot, &id("0"));
    assert_eq!(flat.len(), 199_999);
    assert_eq!(flat[0].as_str(), "199999");
    assert_eq!(flat[flat.len() - 1].as_str(), "1");
}

#[test]
fn test_dangling_references_tolerated() {
    let mut comments = BTreeMap::new();
    comments.insert(id("r"), Comment::new("r", at(0), user("root")));
    comments.insert(id("x"), Comment::reply("x", "r", at(5), user("xan")));
    comments.insert(id("y"), Comment::reply("y", "gone", at(6), user("yul")));
    let mut index = BTreeMap::new();
    index.insert(id("r"), vec![id("x"), id("gone")]);
    index.insert(id("gone"), vec![id("y")]);
    let snapshot = CommentSnapshot::from_parts(comments, index);

    assert_eq!(count_replies(&snapshot, &id("r")), 3);
    assert_eq!(strs(&flatten_replies(&snapshot, &id("r"))), vec!["gone", "x", "y"]);
    assert_eq!(resolve_mention(&snapshot, &id("y"), &id("r")), None);

    let state = ExpandedReplies::new().reduce(&ExpandedRepliesAction::set("r", true));
    let view = ThreadComposer::new(ThreadPolicy::default()).compose(&snapshot, &state, &id("r")).unwrap();
    assert_eq!(view.reply_count, 3);
    let shown: Vec<_> = view.replies.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(shown, vec!["x", "y"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// COMPOSITION
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_composed_thread_is_one_level_deep() {
    let snapshot = build_branching_thread();
    let mut state = ExpandedReplies::new();
    state.apply(&ExpandedRepliesAction::toggle("r"));

    let view = ThreadComposer::new(ThreadPolicy::default()).compose(&snapshot, &state, &id("r")).unwrap();

    assert_eq!(view.reply_count, 7);
    assert_eq!(view.label.as_deref(), Some("7 replies"));
    let shown: Vec<_> = view.replies.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(shown, vec!["a", "c", "b", "c1", "a1", "a11"]);
    assert!(view.replies.iter().all(|r| r.level == REPLY_LEVEL));

    let mentions: Vec<_> = view
        .replies
        .iter()
        .map(|r| r.mention.as_ref().map(|m| m.author_name.as_str()))
        .collect();
    assert_eq!(mentions, vec![None, None, None, Some("cat"), Some("ann"), Some("abe")]);
}

#[test]
fn test_cached_and_uncached_agree() {
    let snapshot = build_branching_thread();
    let state = ExpandedReplies::new().reduce(&ExpandedRepliesAction::set("r", true));

    let cached = ThreadComposer::new(ThreadPolicy::default());
    let uncached = ThreadComposer::new(ThreadPolicy::uncached());

    for _ in 0..3 {
        assert_eq!(
            cached.compose(&snapshot, &state, &id("r")),
            uncached.compose(&snapshot, &state, &id("r")),
        );
    }
    assert!(cached.cache_stats().unwrap().hits >= 4);
}

#[test]
fn test_snapshot_json_round_trip_through_composer() {
    let json = r#"{
        "topComments": ["t1"],
        "allComments": {
            "t1": {"id": "t1", "pid": "", "time": "2024-06-01T10:00:00Z", "user": {"id": "u1", "name": "one", "picture": ""}},
            "t2": {"id": "t2", "pid": "t1", "time": "2024-06-01T10:05:00Z", "user": {"id": "u2", "name": "two", "picture": ""}},
            "t3": {"id": "t3", "pid": "t2", "time": "2024-06-01T10:02:00Z", "user": {"id": "u3", "name": "three", "picture": ""}}
        },
        "childComments": {"t1": ["t2"], "t2": ["t3"]}
    }"#;
    let snapshot = CommentSnapshot::from_json_str(json).unwrap();

    let mut state = ExpandedReplies::new();
    state.apply(&ExpandedRepliesAction::from_json(r#"{"type":"EXPANDED_REPLIES_TOGGLE","id":"t1"}"#).unwrap());
    state.apply(&ExpandedRepliesAction::from_json(r#"{"type":"POST_INFO_SET","info":{}}"#).unwrap());

    let views = ThreadComposer::new(ThreadPolicy::default()).compose_all(&snapshot, &state);
    assert_eq!(views.len(), 1);
    let shown: Vec<_> = views[0].replies.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(shown, vec!["t3", "t2"]);
    assert_eq!(views[0].replies[0].mention.as_ref().unwrap().author_name, "two");

    let rendered = serde_json::to_value(&views).unwrap();
    assert_eq!(rendered[0]["reply_count"], 2);
    assert_eq!(rendered[0]["label"], "2 replies");
}

#[test]
fn test_snapshot_json_ties_follow_store_order() {
    let json = r#"{
        "allComments": {
            "r": {"id": "r", "time": "2024-06-01T10:00:00Z", "user": {"id": "u1", "name": "root", "picture": ""}},
            "z": {"id": "z", "pid": "r", "time": "2024-06-01T10:00:01Z", "user": {"id": "u2", "name": "zed", "picture": ""}},
            "a": {"id": "a", "pid": "r", "time": "2024-06-01T10:00:01Z", "user": {"id": "u3", "name": "amy", "picture": ""}},
            "m": {"id": "m", "time": "2024-06-01T09:00:00Z", "user": {"id": "u4", "name": "max", "picture": ""}}
        }
    }"#;
    let snapshot = CommentSnapshot::from_json_str(json).unwrap();

    assert_eq!(strs(&flatten_replies(&snapshot, &id("r"))), vec!["z", "a"]);

    let views = ThreadComposer::new(ThreadPolicy::default()).compose_all(&snapshot, &ExpandedReplies::new());
    let roots: Vec<_> = views.iter().map(|v| v.root.id.as_str()).collect();
    assert_eq!(roots, vec!["r", "m"]);
}
