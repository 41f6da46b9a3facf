#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Atomic Test
//!
//! Soft assertions for runnable examples. A check never aborts the example
//! it sits in: it echoes the actual value to the console and, on mismatch,
//! adds one greppable line starting with `[Error]: `. A run is clean when
//! that tag never shows up in the output.
//!
//! Atomic Test provides:
//! - **Assertions**: [`eq`], [`neq`], [`eq_text`] and [`eq_float`]
//! - **Failure capture**: [`capture`] and [`capture_panic`] turn an `Err`
//!   or a panic into a comparable [`Descriptor`]
//! - **Trace**: [`trace`] collects values across calls and compares them
//!   as one block
//!
//! ## Example
//!
//! ```rust
//! use atomictest::{capture, eq, eq_float, eq_text, trace};
//!
//! eq(&(2 + 2), &4);
//! eq(&(0.1 + 0.2), &0.3);
//! eq_text(&vec![1, 2, 3], "[1, 2, 3]");
//! eq_float(1.5f32, 1.5);
//!
//! capture(|| "seven".parse::<u32>())
//!     .eq("ParseIntError: invalid digit found in string");
//!
//! for i in 1..=3 {
//!     trace().push(&i);
//! }
//! trace().eq("
//!     1
//!     2
//!     3
//! ");
//! ```
//!
//! The free functions use one process-wide [`Kit`] that writes to stdout.
//! Code that wants its own console, error tag or float tolerance builds a
//! [`Kit`] and calls the same operations as methods.

pub mod capture;
mod config;
mod console;
mod kit;
pub mod normalize;
mod render;
mod same;
mod trace;

use once_cell::sync::Lazy;

pub use capture::{Captured, Descriptor, NO_EXCEPTION, PANIC_KIND, simple_type_name};
pub use config::{ConfigError, DEFAULT_FLOAT_TOLERANCE, ERROR_TAG, KitConfig};
pub use console::{Console, SharedBuffer};
pub use kit::{Kit, Outcome, Relation};
pub use render::{Render, render};
pub use same::Same;
pub use trace::{Trace, TraceLog};

static GLOBAL: Lazy<Kit> = Lazy::new(Kit::default);

/// The process-wide kit behind the free functions.
pub fn kit() -> &'static Kit {
    &GLOBAL
}

/// Assert that `actual` equals `expected`, floats within tolerance.
pub fn eq<T: Same + Render + ?Sized>(actual: &T, expected: &T) -> Outcome {
    kit().eq(actual, expected)
}

/// Assert that `actual` differs from `expected`.
pub fn neq<T: Same + Render + ?Sized>(actual: &T, expected: &T) -> Outcome {
    kit().neq(actual, expected)
}

/// Assert that the rendering of `actual` matches an expected text block.
pub fn eq_text<T: Render + ?Sized>(actual: &T, expected: &str) -> Outcome {
    kit().eq_text(actual, expected)
}

/// Assert that two floats are equal within the default tolerance.
pub fn eq_float<F: Same + Render>(actual: F, expected: F) -> Outcome {
    kit().eq_float(actual, expected)
}

/// Run an operation expected to fail with an `Err` or a panic.
pub fn capture<T, E, F>(operation: F) -> Captured<'static>
where
    E: std::fmt::Display + std::fmt::Debug,
    F: FnOnce() -> Result<T, E>,
{
    kit().capture(operation)
}

/// Run an operation expected to panic.
pub fn capture_panic<T, F>(operation: F) -> Captured<'static>
where
    F: FnOnce() -> T,
{
    kit().capture_panic(operation)
}

/// The process-wide trace.
pub fn trace() -> Trace<'static> {
    kit().trace()
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Captured, Descriptor, Kit, KitConfig, Outcome, Render, Same, Trace, capture, capture_panic,
        eq, eq_float, eq_text, neq, render, trace,
    };
}
