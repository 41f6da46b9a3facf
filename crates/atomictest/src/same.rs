//! Equality as the assertions see it.
//!
//! [`Same`] is `PartialEq` for everything except floats, which compare
//! equal when they differ by less than the kit's tolerance. Containers
//! compare element by element, so `vec![0.1 + 0.2]` matches `vec![0.3]`.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Equality used by `eq` and `neq`.
pub trait Same {
    /// Returns true if `self` and `other` count as equal. `tolerance` only
    /// applies to floating-point values.
    fn same(&self, other: &Self, tolerance: f64) -> bool;
}

/// Implement [`Same`] for types through their `PartialEq` impl.
#[macro_export]
macro_rules! impl_same_via_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Same for $ty {
                fn same(&self, other: &Self, _tolerance: f64) -> bool {
                    self == other
                }
            }
        )+
    };
}

impl_same_via_eq!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String, (),
);

impl Same for f64 {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        (self - other).abs() < tolerance
    }
}

impl Same for f32 {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        (f64::from(*self) - f64::from(*other)).abs() < tolerance
    }
}

macro_rules! same_via_deref {
    ($($ptr:ident),+) => {
        $(
            impl<T: Same + ?Sized> Same for $ptr<T> {
                fn same(&self, other: &Self, tolerance: f64) -> bool {
                    (**self).same(&**other, tolerance)
                }
            }
        )+
    };
}

same_via_deref!(Box, Rc, Arc);

impl<T: Same + ?Sized> Same for &T {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        (**self).same(*other, tolerance)
    }
}

impl<T: Same> Same for Option<T> {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b, tolerance),
            (None, None) => true,
            _ => false,
        }
    }
}

fn same_seq<'a, T, I>(a: I, b: I, tolerance: f64) -> bool
where
    T: Same + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    a.len() == b.len() && a.zip(b).all(|(x, y)| x.same(y, tolerance))
}

impl<T: Same> Same for [T] {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        same_seq(self.iter(), other.iter(), tolerance)
    }
}

impl<T: Same, const N: usize> Same for [T; N] {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        self[..].same(&other[..], tolerance)
    }
}

impl<T: Same> Same for Vec<T> {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        self[..].same(&other[..], tolerance)
    }
}

impl<T: Same> Same for VecDeque<T> {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        same_seq(self.iter(), other.iter(), tolerance)
    }
}

impl<T: Same> Same for BTreeSet<T> {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        same_seq(self.iter(), other.iter(), tolerance)
    }
}

impl<K: Same, V: Same> Same for BTreeMap<K, V> {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|((ka, va), (kb, vb))| ka.same(kb, tolerance) && va.same(vb, tolerance))
    }
}

impl<A: Same, B: Same> Same for (A, B) {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        self.0.same(&other.0, tolerance) && self.1.same(&other.1, tolerance)
    }
}

impl<A: Same, B: Same, C: Same> Same for (A, B, C) {
    fn same(&self, other: &Self, tolerance: f64) -> bool {
        self.0.same(&other.0, tolerance)
            && self.1.same(&other.1, tolerance)
            && self.2.same(&other.2, tolerance)
    }
}
