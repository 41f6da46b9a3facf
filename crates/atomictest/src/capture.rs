//! Failure capture.
//!
//! [`Kit::capture`] runs an operation that is expected to fail and turns the
//! failure into a [`Descriptor`], a plain value that renders as
//! `Kind: message` and can be compared like any other output. Both failure
//! channels are caught: an `Err` return and a panic. Nothing is re-raised.
//!
//! ```rust
//! use atomictest::Kit;
//!
//! let kit = Kit::buffered();
//! kit.capture(|| "x1".parse::<i32>())
//!     .eq("ParseIntError: invalid digit found in string");
//! kit.capture_panic(|| panic!("boom")).eq("Panic: boom");
//! assert_eq!(kit.failures(), 0);
//! ```

use std::any::{Any, type_name};
use std::fmt::{Debug, Display};
use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};

use crate::kit::{Kit, Outcome};
use crate::render::Render;

/// Kind reported for operations that panicked.
pub const PANIC_KIND: &str = "Panic";

/// Text of the "no failure happened" sentinel, after the error tag.
pub const NO_EXCEPTION: &str = "Expected an exception";

/// Normalized outcome of a captured operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    kind: Option<String>,
    detail_message: String,
}

impl Descriptor {
    /// Descriptor of a failure of the given kind.
    ///
    /// Any message, even an empty one, is appended after `": "`.
    pub fn failure(kind: impl Into<String>, message: Option<&str>) -> Self {
        let detail_message = message.map(|msg| format!(": {}", msg)).unwrap_or_default();
        Self {
            kind: Some(kind.into()),
            detail_message,
        }
    }

    /// Sentinel descriptor for an operation that completed normally.
    pub fn no_exception(error_tag: &str) -> Self {
        Self {
            kind: None,
            detail_message: format!("{}{}", error_tag, NO_EXCEPTION),
        }
    }

    /// Simple type name of the failure, `None` if nothing failed.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// `": message"`, empty when there was no message, or the sentinel text.
    pub fn detail_message(&self) -> &str {
        &self.detail_message
    }

    /// Returns true if the operation failed as expected.
    pub fn is_failure(&self) -> bool {
        self.kind.is_some()
    }
}

crate::impl_same_via_eq!(Descriptor);

impl Render for Descriptor {
    fn render(&self) -> String {
        format!("{}{}", self.kind().unwrap_or(""), self.detail_message)
    }
}

impl std::fmt::Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A [`Descriptor`] bound to the kit that produced it, so comparisons
/// report to the same console.
#[derive(Debug, Clone)]
pub struct Captured<'k> {
    kit: &'k Kit,
    descriptor: Descriptor,
}

impl<'k> Captured<'k> {
    /// The captured descriptor.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Consume the handle, keeping only the descriptor.
    pub fn into_descriptor(self) -> Descriptor {
        self.descriptor
    }

    /// Assert that the rendered descriptor equals an expected text.
    pub fn eq(&self, expected: &str) -> Outcome {
        self.kit.eq_text(&self.descriptor, expected)
    }

    /// Assert that every part occurs in the rendered descriptor.
    ///
    /// Silent on success. On failure the full message and the required
    /// parts are both written.
    pub fn contains(&self, parts: &[&str]) -> Outcome {
        let message = self.descriptor.render();
        let missing: Vec<&str> = parts
            .iter()
            .copied()
            .filter(|part| !message.contains(part))
            .collect();

        if missing.is_empty() {
            return Outcome::Pass;
        }

        tracing::warn!(%message, ?missing, "captured message lacks expected parts");
        self.kit.report_failure(&[
            format!("Actual message: {}", message),
            format!("Expected parts: [{}]", parts.join(", ")),
        ]);
        Outcome::Fail
    }
}

impl Deref for Captured<'_> {
    type Target = Descriptor;

    fn deref(&self) -> &Descriptor {
        &self.descriptor
    }
}

impl Render for Captured<'_> {
    fn render(&self) -> String {
        self.descriptor.render()
    }
}

/// Name of a type without module path or generic arguments.
///
/// `core::num::error::ParseIntError` becomes `ParseIntError`,
/// `alloc::vec::Vec<u8>` becomes `Vec`, `&str` becomes `str`.
pub fn simple_type_name<T: ?Sized>() -> String {
    let full = type_name::<T>().trim_start_matches('&');
    let full = full.strip_prefix("mut ").unwrap_or(full);
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Kind of an `Err` value.
///
/// Smart pointers and trait objects hide the concrete error type from
/// [`simple_type_name`], so for those the kind is read from the leading
/// identifier of the `Debug` output, as in `CustomError("x")`.
fn error_kind<E: Debug + ?Sized>(err: &E) -> String {
    let static_name = simple_type_name::<E>();
    let full = type_name::<E>().trim_start_matches('&');
    let erased = matches!(static_name.as_str(), "Box" | "Arc" | "Rc") || full.starts_with("dyn ");
    if !erased {
        return static_name;
    }

    let debug = format!("{:?}", err);
    let ident: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if ident.starts_with(|c: char| c.is_alphabetic()) {
        ident
    } else {
        static_name
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

impl Kit {
    /// Run an operation expected to fail with an `Err` or a panic.
    pub fn capture<T, E, F>(&self, operation: F) -> Captured<'_>
    where
        E: Display + Debug,
        F: FnOnce() -> Result<T, E>,
    {
        let descriptor = match panic::catch_unwind(AssertUnwindSafe(operation)) {
            Ok(Ok(_)) => Descriptor::no_exception(&self.config().error_tag),
            Ok(Err(err)) => Descriptor::failure(error_kind(&err), Some(&err.to_string())),
            Err(payload) => Descriptor::failure(PANIC_KIND, panic_message(payload.as_ref())),
        };
        self.captured(descriptor)
    }

    /// Run an operation expected to panic.
    pub fn capture_panic<T, F>(&self, operation: F) -> Captured<'_>
    where
        F: FnOnce() -> T,
    {
        let descriptor = match panic::catch_unwind(AssertUnwindSafe(operation)) {
            Ok(_) => Descriptor::no_exception(&self.config().error_tag),
            Err(payload) => Descriptor::failure(PANIC_KIND, panic_message(payload.as_ref())),
        };
        self.captured(descriptor)
    }

    fn captured(&self, descriptor: Descriptor) -> Captured<'_> {
        tracing::debug!(
            kind = descriptor.kind().unwrap_or("<none>"),
            detail = descriptor.detail_message(),
            "operation captured"
        );
        Captured {
            kit: self,
            descriptor,
        }
    }
}
