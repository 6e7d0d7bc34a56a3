//! Domain-specific assertion macros for dropwatch harnesses.
//!
//! These add context-rich failure messages that make it clear *which* store
//! invariant was violated.

use dropwatch_core::{Category, Classification, DropEvent};

// ---------------------------------------------------------------------------
// Classifier assertions
// ---------------------------------------------------------------------------

/// Assert that a line classifies as a drop with the given category and
/// summary, and return the event.
///
/// ```rust
/// let ev = assert_drop!(line, Category::Internal, "A B C PROTO=TCP DPT=80");
/// ```
#[macro_export]
macro_rules! assert_drop {
    ($line:expr, $category:expr, $summary:expr) => {{
        let line: &str = &$line;
        match dropwatch_core::classify(line) {
            dropwatch_core::Classification::Drop(cat, ev) => {
                pretty_assertions::assert_eq!(cat, $category, "category for {:?}", line);
                pretty_assertions::assert_eq!(ev.summary(), $summary, "summary for {:?}", line);
                ev
            }
            other => panic!(
                "assert_drop! failed: expected a drop.\n  line: {:?}\n  got:  {:?}",
                line, other
            ),
        }
    }};
}

/// Return the drop for a line, panicking with the classification otherwise.
pub fn expect_drop(line: &str) -> (Category, DropEvent) {
    match dropwatch_core::classify(line) {
        Classification::Drop(cat, ev) => (cat, ev),
        other => panic!("expected a drop for {line:?}, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Window assertions
// ---------------------------------------------------------------------------

/// Assert that a window is strictly increasing in `item-N` order and that
/// every element belongs to the pushed set `0..pushed`.
pub fn assert_window_is_ordered_subset(window: &[String], pushed: usize) {
    let mut prev: Option<usize> = None;
    for item in window {
        let n: usize = item
            .strip_prefix("item-")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| panic!("torn or foreign element in window: {item:?}"));
        assert!(n < pushed, "element {item:?} was never pushed (pushed {pushed})");
        if let Some(p) = prev {
            assert_eq!(n, p + 1, "window is not contiguous oldest-to-newest: {window:?}");
        }
        prev = Some(n);
    }
}
