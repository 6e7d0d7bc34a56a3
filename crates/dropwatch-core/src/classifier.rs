//! Classifier — turns one raw kernel log line into a [`DropEvent`](crate::DropEvent).
//!
//! Lines are split on single spaces exactly as they arrive; no quoting or
//! escaping is honoured, and a double space produces an empty token. The
//! layout expected for a drop line is the journal short format with the
//! marker in position 5:
//!
//! ```text
//! 0   1  2        3  4       5                  6       7    8        9              ...
//! Oct 18 12:00:01 gw kernel: EXTERNAL_DROPPED:  IN=eth0 OUT= MAC=...  SRC=203.0.113.7 ... PROTO=TCP ... DPT=22
//! ```

use crate::types::{Category, DropEvent};

/// Minimum token count needed to inspect the marker at index 5.
pub const MIN_TOKENS: usize = 6;

const MARKER_INDEX: usize = 5;
const SOURCE_INDEX: usize = 9;
const PORT_MARKER: &str = "DPT=";
const PROTO_MARKER: &str = "PROTO=";

/// Outcome of classifying a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A firewall drop for the given category.
    Drop(Category, DropEvent),
    /// Not a drop line. The common case; no diagnostics.
    Ignored,
    /// Too few tokens to hold a marker.
    Malformed { tokens: usize },
}

/// Classify one raw line (without its trailing newline).
pub fn classify(line: &str) -> Classification {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() < MIN_TOKENS {
        return Classification::Malformed { tokens: tokens.len() };
    }

    let Some(category) = Category::from_marker(tokens[MARKER_INDEX]) else {
        return Classification::Ignored;
    };

    let source = tokens.get(SOURCE_INDEX).map(|t| t.to_string());
    let (protocol, port) = scan_markers(tokens.get(SOURCE_INDEX + 1..).unwrap_or_default());

    Classification::Drop(
        category,
        DropEvent {
            timestamp: tokens[..3].join(" "),
            host: tokens[3].to_string(),
            process: tokens[4].to_string(),
            category,
            source,
            protocol,
            port,
        },
    )
}

/// Walk the trailing tokens: the first `DPT=` wins, ends the scan and
/// replaces any `PROTO=` seen so far. Without a `DPT=`, the last `PROTO=` is
/// kept.
fn scan_markers(tokens: &[&str]) -> (Option<String>, Option<String>) {
    let mut protocol = None;
    for token in tokens {
        if token.contains(PORT_MARKER) {
            return (None, Some(token.to_string()));
        }
        if token.contains(PROTO_MARKER) {
            protocol = Some(token.to_string());
        }
    }
    (protocol, None)
}
