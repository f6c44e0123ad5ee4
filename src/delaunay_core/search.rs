//! Bounds searches over sorted slices with a caller supplied comparator.
//!
//! All searches run in O(log n) and expect the slice to be sorted
//! consistently with the comparator: elements comparing `Less` first, then
//! `Equal`, then `Greater`. The comparator receives the element; the value
//! searched for is captured by the closure.

use std::cmp::Ordering;

/// Index of the first element comparing `Greater`, or `items.len()` if
/// there is none.
pub fn gt<T>(items: &[T], mut compare: impl FnMut(&T) -> Ordering) -> usize {
    items.partition_point(|item| compare(item) != Ordering::Greater)
}

/// Index of the first element comparing `Equal` or `Greater`, or
/// `items.len()` if there is none.
pub fn ge<T>(items: &[T], mut compare: impl FnMut(&T) -> Ordering) -> usize {
    items.partition_point(|item| compare(item) == Ordering::Less)
}

/// Index of the last element comparing `Less`, or `None` if there is none.
pub fn lt<T>(items: &[T], compare: impl FnMut(&T) -> Ordering) -> Option<usize> {
    ge(items, compare).checked_sub(1)
}

/// Index of the last element comparing `Less` or `Equal`, or `None` if
/// there is none.
pub fn le<T>(items: &[T], compare: impl FnMut(&T) -> Ordering) -> Option<usize> {
    gt(items, compare).checked_sub(1)
}

/// Index of some element comparing `Equal`, or `None` if there is none.
pub fn eq<T>(items: &[T], mut compare: impl FnMut(&T) -> Ordering) -> Option<usize> {
    let index = items.partition_point(|item| compare(item) == Ordering::Less);
    match items.get(index) {
        Some(item) if compare(item) == Ordering::Equal => Some(index),
        _ => None,
    }
}
