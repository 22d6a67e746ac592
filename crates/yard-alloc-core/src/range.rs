// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Inclusive coordinate ranges.
//!
//! Yard plans describe their regions with inclusive bounds (`slot 1..=10`),
//! so unlike a half-open interval both ends belong to the range.

use crate::coord::Coordinate;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::cmp::{max, min};
use std::fmt::{self, Display};
use std::iter::FusedIterator;

/// An inclusive range `[first, last]` over a coordinate axis.
///
/// # Examples
///
/// ```
/// use yard_alloc_core::coord::Slot;
/// use yard_alloc_core::range::CoordRange;
///
/// let r = CoordRange::new(Slot::new(3), Slot::new(1));
/// assert_eq!(r.first(), Slot::new(1));
/// assert_eq!(r.last(), Slot::new(3));
/// assert_eq!(r.len(), 3);
/// assert!(r.contains(Slot::new(3)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "RangeRepr<T>",
    bound(
        serialize = "T: Serialize",
        deserialize = "T: Coordinate + Deserialize<'de>"
    )
)]
pub struct CoordRange<T> {
    start: T,
    end: T,
}

#[doc(hidden)]
#[derive(Deserialize)]
pub struct RangeRepr<T> {
    start: T,
    end: T,
}

impl<T: Coordinate> From<RangeRepr<T>> for CoordRange<T> {
    fn from(repr: RangeRepr<T>) -> Self {
        CoordRange::new(repr.start, repr.end)
    }
}

impl<T: Coordinate> CoordRange<T> {
    /// Creates a new inclusive range. Bounds given in reverse order are swapped.
    #[inline]
    pub fn new(a: T, b: T) -> Self {
        Self {
            start: min(a, b),
            end: max(a, b),
        }
    }

    /// The range `[1, last]`, i.e. the full extent of a block axis.
    #[inline]
    pub fn up_to(last: T) -> Self {
        Self::new(T::first(), last)
    }

    #[inline]
    pub fn first(&self) -> T {
        self.start
    }

    #[inline]
    pub fn last(&self) -> T {
        self.end
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.start <= value && value <= self.end
    }

    #[inline]
    pub fn contains_range(&self, other: &Self) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// Number of coordinates in the range.
    #[inline]
    pub fn len(&self) -> u64 {
        let span = (self.end.raw() - self.start.raw()).to_u64().unwrap_or(u64::MAX);
        span.saturating_add(1)
    }

    /// An inclusive range always holds at least one coordinate.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the overlap of two ranges, or `None` if they are disjoint.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = max(self.start, other.start);
        let end = min(self.end, other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Restricts the range to the addressable coordinates `[1, last]`.
    #[inline]
    pub fn clip_to(&self, last: T) -> Option<Self> {
        if last.is_zero() {
            return None;
        }
        self.intersection(&Self::up_to(last))
    }

    /// Iterates the range in ascending order.
    #[inline]
    pub fn iter(&self) -> CoordIter<T> {
        CoordIter {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl<T: Coordinate> IntoIterator for CoordRange<T> {
    type Item = T;
    type IntoIter = CoordIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Coordinate> IntoIterator for &CoordRange<T> {
    type Item = T;
    type IntoIter = CoordIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Display> Display for CoordRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Ascending iterator over a [`CoordRange`].
#[derive(Clone, Debug)]
pub struct CoordIter<T> {
    next: Option<T>,
    end: T,
}

impl<T: Coordinate> Iterator for CoordIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        self.next = if current < self.end {
            current.checked_next()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(n) => {
                let rem = (self.end.raw() - n.raw())
                    .to_u64()
                    .and_then(|r| usize::try_from(r.saturating_add(1)).ok());
                (rem.unwrap_or(usize::MAX), rem)
            }
        }
    }
}

impl<T: Coordinate> FusedIterator for CoordIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{Row, Slot};

    fn slots(a: u32, b: u32) -> CoordRange<Slot> {
        CoordRange::new(Slot::new(a), Slot::new(b))
    }

    #[test]
    fn test_new_orders_bounds() {
        let r = slots(9, 2);
        assert_eq!(r.first(), Slot::new(2));
        assert_eq!(r.last(), Slot::new(9));
    }

    #[test]
    fn test_iter_is_inclusive_and_ascending() {
        let v: Vec<u32> = slots(3, 6).iter().map(Slot::value).collect();
        assert_eq!(v, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_iter_single_element() {
        let v: Vec<Slot> = slots(4, 4).into_iter().collect();
        assert_eq!(v, vec![Slot::new(4)]);
    }

    #[test]
    fn test_iter_at_axis_max_terminates() {
        let r = CoordRange::new(Row::new(u32::MAX - 1), Row::new(u32::MAX));
        assert_eq!(r.iter().count(), 2);
    }

    #[test]
    fn test_size_hint_matches_len() {
        let r = slots(1, 10);
        assert_eq!(r.iter().size_hint(), (10, Some(10)));
        assert_eq!(r.len(), 10);
    }

    #[test]
    fn test_intersection() {
        assert_eq!(slots(1, 5).intersection(&slots(4, 9)), Some(slots(4, 5)));
        assert_eq!(slots(1, 3).intersection(&slots(4, 9)), None);
    }

    #[test]
    fn test_clip_to_block_extent() {
        assert_eq!(slots(5, 12).clip_to(Slot::new(10)), Some(slots(5, 10)));
        assert_eq!(slots(11, 12).clip_to(Slot::new(10)), None);
        assert_eq!(slots(0, 3).clip_to(Slot::new(10)), Some(slots(1, 3)));
        assert_eq!(slots(1, 3).clip_to(Slot::new(0)), None);
    }

    #[test]
    fn test_deserialize_normalizes_bounds() {
        let r: CoordRange<Slot> = serde_json::from_str(r#"{"start":8,"end":2}"#).unwrap();
        assert_eq!(r, slots(2, 8));
    }
}
