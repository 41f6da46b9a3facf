//! Canonical text rendering of values.
//!
//! Every assertion echoes its actual value and compares rendered text, so
//! the output has to be deterministic. [`Render`] is implemented for the
//! primitives and the standard containers with the formatting the book
//! prints:
//!
//! - `None` renders as `null`
//! - floats always show a fraction (`1.0`, not `1`)
//! - sequences render as `[a, b, c]`, maps as `{k=v, k2=v2}`
//! - tuples render as `(a, b)`
//!
//! User types opt in with [`impl_render_via_display!`](crate::impl_render_via_display)
//! or by implementing [`Render`] directly.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Converts a value into the text used for console echo and comparison.
pub trait Render {
    /// Render this value.
    fn render(&self) -> String;
}

/// Render any value implementing [`Render`].
pub fn render<T: Render + ?Sized>(value: &T) -> String {
    value.render()
}

/// Implement [`Render`] for types through their `Display` impl.
///
/// ```rust
/// use atomictest::{impl_render_via_display, render};
///
/// struct Celsius(i32);
///
/// impl std::fmt::Display for Celsius {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}°C", self.0)
///     }
/// }
///
/// impl_render_via_display!(Celsius);
///
/// assert_eq!(render(&Celsius(21)), "21°C");
/// ```
#[macro_export]
macro_rules! impl_render_via_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Render for $ty {
                fn render(&self) -> ::std::string::String {
                    ::std::string::ToString::to_string(self)
                }
            }
        )+
    };
}

impl_render_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String,
);

// Debug formatting of floats is the shortest round-trip text and keeps the
// trailing `.0` on whole numbers.
impl Render for f32 {
    fn render(&self) -> String {
        format!("{:?}", self)
    }
}

impl Render for f64 {
    fn render(&self) -> String {
        format!("{:?}", self)
    }
}

impl Render for () {
    fn render(&self) -> String {
        "()".to_string()
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render + ?Sized> Render for &mut T {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render + ?Sized> Render for Rc<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render + ?Sized> Render for Arc<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render> Render for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(value) => value.render(),
            None => "null".to_string(),
        }
    }
}

fn render_seq<'a, T, I>(items: I) -> String
where
    T: Render + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let parts: Vec<String> = items.into_iter().map(Render::render).collect();
    format!("[{}]", parts.join(", "))
}

impl<T: Render> Render for [T] {
    fn render(&self) -> String {
        render_seq(self)
    }
}

impl<T: Render, const N: usize> Render for [T; N] {
    fn render(&self) -> String {
        render_seq(self)
    }
}

impl<T: Render> Render for Vec<T> {
    fn render(&self) -> String {
        render_seq(self)
    }
}

impl<T: Render> Render for VecDeque<T> {
    fn render(&self) -> String {
        render_seq(self)
    }
}

impl<T: Render> Render for BTreeSet<T> {
    fn render(&self) -> String {
        render_seq(self)
    }
}

impl<K: Render, V: Render> Render for BTreeMap<K, V> {
    fn render(&self) -> String {
        let parts: Vec<String> = self
            .iter()
            .map(|(k, v)| format!("{}={}", k.render(), v.render()))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }
}

impl<A: Render, B: Render> Render for (A, B) {
    fn render(&self) -> String {
        format!("({}, {})", self.0.render(), self.1.render())
    }
}

impl<A: Render, B: Render, C: Render> Render for (A, B, C) {
    fn render(&self) -> String {
        format!(
            "({}, {}, {})",
            self.0.render(),
            self.1.render(),
            self.2.render()
        )
    }
}
