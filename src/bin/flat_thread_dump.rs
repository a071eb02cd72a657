//! Flat Thread Dump Binary
//!
//! Loads a comment snapshot, expands the requested threads and prints the
//! composed thread views as JSON.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `FLAT_THREAD_POLICY`: path to a policy JSON file (optional)
//! - `RUST_LOG`: Log level filter (default: flat_thread=info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin flat_thread_dump -- comments.json <root-id> [<root-id> ...]
//! ```

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flat_thread::{
    CommentSnapshot, ExpandedReplies, ExpandedRepliesAction, ThreadComposer, ThreadPolicy,
};

/// Initialize the tracing subscriber with JSON or pretty format, on stderr.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "flat_thread=info,flat_thread_dump=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_policy() -> Result<ThreadPolicy, flat_thread::PolicyError> {
    match std::env::var("FLAT_THREAD_POLICY") {
        Ok(path) => {
            info!(path = %path, "Loading policy");
            ThreadPolicy::from_path(path)
        }
        Err(_) => Ok(ThreadPolicy::default()),
    }
}

/// Expanded state with every listed root opened. Repeated ids stay open.
fn open_roots(ids: impl IntoIterator<Item = String>) -> ExpandedReplies {
    let actions: Vec<_> = ids
        .into_iter()
        .map(|id| ExpandedRepliesAction::set(id, true))
        .collect();
    let mut expanded = ExpandedReplies::new();
    expanded.apply_all(&actions);
    expanded
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next() else {
        eprintln!("usage: flat_thread_dump <snapshot.json> [expanded-root-id ...]");
        return ExitCode::from(2);
    };

    let policy = match load_policy() {
        Ok(policy) => policy,
        Err(e) => {
            error!(error = %e, "Failed to load policy");
            return ExitCode::FAILURE;
        }
    };

    let snapshot = match CommentSnapshot::from_path(&snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Failed to load snapshot");
            return ExitCode::FAILURE;
        }
    };

    info!(
        path = %snapshot_path,
        comments = snapshot.num_comments(),
        threads = snapshot.roots().len(),
        version = %snapshot.graph_version(),
        "Snapshot loaded"
    );

    let expanded = open_roots(args);

    let composer = ThreadComposer::new(policy);
    let views = composer.compose_all(&snapshot, &expanded);

    match serde_json::to_string_pretty(&views) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize thread views");
            ExitCode::FAILURE
        }
    }
}
