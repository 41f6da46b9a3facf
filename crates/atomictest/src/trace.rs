//! Trace accumulator.
//!
//! Examples push intermediate values into the trace as they run and finish
//! with one block comparison:
//!
//! ```rust
//! use atomictest::Kit;
//!
//! let kit = Kit::buffered();
//! let trace = kit.trace();
//! for word in ["a", "b"] {
//!     trace.push(&word);
//! }
//! trace.push(&1);
//! assert!(trace.eq("
//!     a
//!     b
//!     1
//! ").is_pass());
//! assert!(trace.is_empty());
//! ```
//!
//! Comparing drains the log, so consecutive examples never see each
//! other's entries.

use std::fmt::Display;

use parking_lot::Mutex;

use crate::kit::{Kit, Outcome, Relation};
use crate::normalize::{collapse_lines, trim_indent};
use crate::render::Render;

/// Ordered log of rendered values.
#[derive(Debug, Default)]
pub struct TraceLog {
    entries: Mutex<Vec<String>>,
}

impl TraceLog {
    fn append(&self, entry: String) {
        let mut entries = self.entries.lock();
        entries.push(entry);
        tracing::trace!(len = entries.len(), "trace entry appended");
    }

    /// Read and clear the log under a single lock acquisition.
    fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.entries.lock())
    }
}

/// Handle on the trace log of a [`Kit`].
#[derive(Debug, Clone, Copy)]
pub struct Trace<'k> {
    kit: &'k Kit,
}

impl<'k> Trace<'k> {
    pub(crate) fn new(kit: &'k Kit) -> Self {
        Self { kit }
    }

    fn log(&self) -> &'k TraceLog {
        self.kit.trace_log()
    }

    /// Append the rendering of a value.
    pub fn push<T: Render + ?Sized>(&self, value: &T) {
        self.log().append(value.render());
    }

    /// Append a value through its `Display` impl.
    pub fn push_display<T: Display + ?Sized>(&self, value: &T) {
        self.log().append(value.to_string());
    }

    /// Number of entries collected so far.
    pub fn len(&self) -> usize {
        self.log().entries.lock().len()
    }

    /// Returns true if nothing has been collected since the last comparison.
    pub fn is_empty(&self) -> bool {
        self.log().entries.lock().is_empty()
    }

    /// Snapshot of the collected entries.
    pub fn entries(&self) -> Vec<String> {
        self.log().entries.lock().clone()
    }

    /// Discard the collected entries without comparing.
    pub fn clear(&self) {
        self.log().entries.lock().clear();
    }

    /// Compare the collected entries against an expected block, then clear.
    ///
    /// Entries are joined with newlines. Both sides are collapsed to one
    /// line before comparison, after the expected block has its common
    /// indentation removed, so line breaks and indentation inside the
    /// expected literal do not matter.
    pub fn eq(&self, expected_block: &str) -> Outcome {
        let actual = self.log().drain().join("\n");
        let expected = trim_indent(expected_block);
        let passed = collapse_lines(&actual) == collapse_lines(&expected);
        self.kit.check(&actual, &expected, Relation::Equal, passed)
    }
}

impl Kit {
    /// The trace log of this kit.
    pub fn trace(&self) -> Trace<'_> {
        Trace::new(self)
    }
}
