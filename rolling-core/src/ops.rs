//! Ready-made associative operators
//!
//! Each function has the `Fn(&T, &T) -> T` shape every window accepts, so
//! they can be passed directly: `FixedWindowAssociativeOp::new(ops::max, 3)`.
//! None of them need an identity element, and `concat`/`concat_str` are the
//! usual examples of operators that are associative but not commutative.

use std::collections::BTreeSet;
use std::ops::{Add, Mul};

/// Sum of two values
pub fn sum<T>(lhs: &T, rhs: &T) -> T
where
    T: Clone + Add<Output = T>,
{
    lhs.clone() + rhs.clone()
}

/// Product of two values
pub fn product<T>(lhs: &T, rhs: &T) -> T
where
    T: Clone + Mul<Output = T>,
{
    lhs.clone() * rhs.clone()
}

/// Larger of two values, the left one on ties
pub fn max<T>(lhs: &T, rhs: &T) -> T
where
    T: Clone + PartialOrd,
{
    if rhs > lhs {
        rhs.clone()
    } else {
        lhs.clone()
    }
}

/// Smaller of two values, the left one on ties
pub fn min<T>(lhs: &T, rhs: &T) -> T
where
    T: Clone + PartialOrd,
{
    if rhs < lhs {
        rhs.clone()
    } else {
        lhs.clone()
    }
}

/// Logical AND
pub fn and(lhs: &bool, rhs: &bool) -> bool {
    *lhs && *rhs
}

/// Logical OR
pub fn or(lhs: &bool, rhs: &bool) -> bool {
    *lhs || *rhs
}

/// Concatenation of two sequences, left first
#[allow(clippy::ptr_arg)]
pub fn concat<T: Clone>(lhs: &Vec<T>, rhs: &Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(lhs.len() + rhs.len());
    out.extend_from_slice(lhs);
    out.extend_from_slice(rhs);
    out
}

/// Concatenation of two strings, left first
#[allow(clippy::ptr_arg)]
pub fn concat_str(lhs: &String, rhs: &String) -> String {
    let mut out = String::with_capacity(lhs.len() + rhs.len());
    out.push_str(lhs);
    out.push_str(rhs);
    out
}

/// Union of two sets
pub fn union<T: Ord + Clone>(lhs: &BTreeSet<T>, rhs: &BTreeSet<T>) -> BTreeSet<T> {
    lhs.union(rhs).cloned().collect()
}
