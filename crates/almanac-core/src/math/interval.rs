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

use num_traits::PrimInt;
use std::cmp::{max, min};

/// A half-open interval `[start, end)` of integers.
///
/// The interval carries every integer `v` with `start <= v < end`. An interval
/// with `start == end` is empty and carries no values, but still has a
/// well-defined position, which matters when it is classified or translated.
///
/// # Invariants
/// `start_inclusive` must always be less than or equal to `end_exclusive`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval<T>
where
    T: PrimInt,
{
    start_inclusive: T,
    end_exclusive: T,
}

/// The position of an interval relative to a window it is compared against.
///
/// Produced by [`Interval::overlap`]. Every pair of well-formed intervals
/// falls into exactly one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlap {
    /// The interval and the window share no values.
    Disjoint,
    /// The window covers the whole interval.
    Contained,
    /// The interval starts inside the window and runs past its end.
    ///
    /// ```raw
    /// --RRRR
    /// WWWW
    /// ```
    OverflowRight,
    /// The interval starts before the window and ends inside it.
    ///
    /// ```raw
    /// RRRR
    /// --WWWW
    /// ```
    OverflowLeft,
    /// The interval sticks out of the window on both sides.
    ///
    /// ```raw
    /// RRRR
    /// -WW-
    /// ```
    StrictlyContains,
}

impl std::fmt::Display for Overlap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Overlap::Disjoint => write!(f, "Disjoint"),
            Overlap::Contained => write!(f, "Contained"),
            Overlap::OverflowRight => write!(f, "OverflowRight"),
            Overlap::OverflowLeft => write!(f, "OverflowLeft"),
            Overlap::StrictlyContains => write!(f, "StrictlyContains"),
        }
    }
}

impl<T> Interval<T>
where
    T: PrimInt,
{
    /// Creates a new `Interval`.
    ///
    /// # Panics
    ///
    /// Panics if `start_inclusive > end_exclusive`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_core::math::interval::Interval;
    ///
    /// let iv = Interval::new(79, 93);
    /// assert_eq!(iv.len(), 14);
    /// ```
    #[inline]
    pub fn new(start_inclusive: T, end_exclusive: T) -> Self {
        assert!(
            start_inclusive <= end_exclusive,
            "Invalid interval: start_inclusive must be less than or equal to end_exclusive"
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Creates a new `Interval` if `start_inclusive <= end_exclusive`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_core::math::interval::Interval;
    ///
    /// assert!(Interval::try_new(0, 10).is_some());
    /// assert!(Interval::try_new(10, 0).is_none());
    /// ```
    #[inline]
    pub fn try_new(start_inclusive: T, end_exclusive: T) -> Option<Self> {
        if start_inclusive <= end_exclusive {
            Some(Self {
                start_inclusive,
                end_exclusive,
            })
        } else {
            None
        }
    }

    /// Creates a new `Interval` without checking invariants in release builds.
    ///
    /// The caller must ensure `start_inclusive <= end_exclusive`.
    #[inline]
    pub fn new_unchecked(start_inclusive: T, end_exclusive: T) -> Self {
        debug_assert!(
            start_inclusive <= end_exclusive,
            "Invalid interval: start_inclusive must be less than or equal to end_exclusive"
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Creates the interval `[start, start + len)`.
    ///
    /// Returns `None` if `len` is negative or if the end is not representable in `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_core::math::interval::Interval;
    ///
    /// assert_eq!(Interval::with_len(55, 13), Some(Interval::new(55, 68)));
    /// assert_eq!(Interval::<u8>::with_len(250, 10), None);
    /// ```
    #[inline]
    pub fn with_len(start: T, len: T) -> Option<Self> {
        if len < T::zero() {
            return None;
        }
        let end = start.checked_add(&len)?;
        Some(Self::new_unchecked(start, end))
    }

    /// Returns the inclusive start bound of the interval.
    #[inline]
    pub const fn start(&self) -> T {
        self.start_inclusive
    }

    /// Returns the exclusive end bound of the interval.
    #[inline]
    pub const fn end(&self) -> T {
        self.end_exclusive
    }

    /// Returns the number of values in the interval (`end - start`).
    #[inline]
    pub fn len(&self) -> T {
        self.end_exclusive - self.start_inclusive
    }

    /// Returns `true` if the interval carries no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns `true` if `value` lies in `[start, end)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_core::math::interval::Interval;
    ///
    /// let iv = Interval::new(0, 10);
    /// assert!(iv.contains_point(0));
    /// assert!(!iv.contains_point(10));
    /// ```
    #[inline]
    pub fn contains_point(&self, value: T) -> bool {
        self.start_inclusive <= value && value < self.end_exclusive
    }

    /// Returns `true` if `other` lies entirely within `self`.
    #[inline]
    pub fn contains_interval(&self, other: Self) -> bool {
        self.start_inclusive <= other.start_inclusive && other.end_exclusive <= self.end_exclusive
    }

    /// Returns `true` if the two intervals share at least one value.
    ///
    /// Adjacent intervals such as `[0, 10)` and `[10, 20)` do not intersect.
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }

    /// Returns the values shared by both intervals, or `None` if there are none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_core::math::interval::Interval;
    ///
    /// let a = Interval::new(0, 10);
    /// let b = Interval::new(5, 15);
    /// assert_eq!(a.intersection(b), Some(Interval::new(5, 10)));
    /// ```
    #[inline]
    pub fn intersection(&self, other: Self) -> Option<Self> {
        let new_start = max(self.start_inclusive, other.start_inclusive);
        let new_end = min(self.end_exclusive, other.end_exclusive);

        if new_start < new_end {
            Some(Self::new_unchecked(new_start, new_end))
        } else {
            None
        }
    }

    /// Classifies how `self` sits relative to `window`.
    ///
    /// The window is disjoint from `self` when `window.end <= self.start` or
    /// `window.start >= self.end`; touching bounds therefore count as disjoint.
    /// Returns `None` only if one of the intervals violates `start <= end`,
    /// which the safe constructors rule out.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_core::math::interval::{Interval, Overlap};
    ///
    /// let window = Interval::new(10, 20);
    /// assert_eq!(Interval::new(0, 5).overlap(window), Some(Overlap::Disjoint));
    /// assert_eq!(Interval::new(12, 18).overlap(window), Some(Overlap::Contained));
    /// assert_eq!(Interval::new(15, 25).overlap(window), Some(Overlap::OverflowRight));
    /// assert_eq!(Interval::new(5, 15).overlap(window), Some(Overlap::OverflowLeft));
    /// assert_eq!(Interval::new(5, 25).overlap(window), Some(Overlap::StrictlyContains));
    /// ```
    pub fn overlap(&self, window: Self) -> Option<Overlap> {
        let (r_start, r_end) = (self.start_inclusive, self.end_exclusive);
        let (w_start, w_end) = (window.start_inclusive, window.end_exclusive);

        if w_end <= r_start || w_start >= r_end {
            return Some(Overlap::Disjoint);
        }
        if w_start <= r_start && r_end <= w_end {
            return Some(Overlap::Contained);
        }
        if w_start <= r_start && r_start < w_end && w_end < r_end {
            return Some(Overlap::OverflowRight);
        }
        if r_start < w_start && w_start <= r_end && r_end <= w_end {
            return Some(Overlap::OverflowLeft);
        }
        if r_start < w_start && w_end < r_end {
            return Some(Overlap::StrictlyContains);
        }
        None
    }

    /// Moves the interval so that the point `from` lands on `to`.
    ///
    /// Computed as `v - from + to` for both bounds, so callers that only rebase
    /// intervals starting at or after `from` never underflow unsigned types.
    /// Returns `None` if a bound is not representable in `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_core::math::interval::Interval;
    ///
    /// let iv = Interval::new(12, 15);
    /// assert_eq!(iv.rebase(10, 100), Some(Interval::new(102, 105)));
    /// assert_eq!(iv.rebase(10, 0), Some(Interval::new(2, 5)));
    /// ```
    #[inline]
    pub fn rebase(&self, from: T, to: T) -> Option<Self> {
        let start = self.start_inclusive.checked_sub(&from)?.checked_add(&to)?;
        let end = self.end_exclusive.checked_sub(&from)?.checked_add(&to)?;
        Some(Self::new_unchecked(start, end))
    }
}

impl<T> Default for Interval<T>
where
    T: PrimInt,
{
    #[inline]
    fn default() -> Self {
        Self {
            start_inclusive: T::zero(),
            end_exclusive: T::zero(),
        }
    }
}

impl<T> std::fmt::Debug for Interval<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interval")
            .field("start_inclusive", &self.start_inclusive)
            .field("end_exclusive", &self.end_exclusive)
            .finish()
    }
}

impl<T> std::fmt::Display for Interval<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T> From<std::ops::Range<T>> for Interval<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(range: std::ops::Range<T>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl<T> From<Interval<T>> for std::ops::Range<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(iv: Interval<T>) -> Self {
        iv.start_inclusive..iv.end_exclusive
    }
}
