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

//! A single remapping rule between two categories.
//!
//! A `RangeMap` pairs a source interval with a destination interval of the
//! same length. Every value `v` in the source is translated to
//! `v - source.start + destination.start`; values outside the source are not
//! touched by the rule.

use almanac_core::math::interval::Interval;
use num_traits::PrimInt;

/// The reasons a `RangeMap` cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeMapError {
    /// The rule length is negative.
    #[error("range length must not be negative")]
    NegativeLength,
    /// The end of the source or destination range is not representable.
    #[error("range end overflows the value type")]
    Overflow,
    /// The source and destination intervals have different lengths.
    #[error("source and destination ranges must have the same length")]
    LengthMismatch,
}

/// One `(source, destination)` rule of a category map.
///
/// # Invariants
/// `source.len() == destination.len()`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeMap<T>
where
    T: PrimInt,
{
    source: Interval<T>,
    destination: Interval<T>,
}

impl<T> RangeMap<T>
where
    T: PrimInt,
{
    /// Creates a rule from two intervals of equal length.
    ///
    /// # Panics
    ///
    /// Panics if the intervals have different lengths.
    #[inline]
    pub fn new(source: Interval<T>, destination: Interval<T>) -> Self {
        assert!(
            source.len() == destination.len(),
            "Invalid range map: source and destination must have the same length"
        );
        Self {
            source,
            destination,
        }
    }

    /// Creates a rule from two intervals, returning an error if their lengths differ.
    #[inline]
    pub fn try_new(source: Interval<T>, destination: Interval<T>) -> Result<Self, RangeMapError> {
        if source.len() != destination.len() {
            return Err(RangeMapError::LengthMismatch);
        }
        Ok(Self {
            source,
            destination,
        })
    }

    /// Creates a rule from the textual triple `<destination start> <source start> <length>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_core::math::interval::Interval;
    /// # use almanac_model::range_map::RangeMap;
    ///
    /// let rule = RangeMap::from_triple(50, 98, 2).unwrap();
    /// assert_eq!(rule.source(), Interval::new(98, 100));
    /// assert_eq!(rule.destination(), Interval::new(50, 52));
    /// ```
    pub fn from_triple(
        destination_start: T,
        source_start: T,
        length: T,
    ) -> Result<Self, RangeMapError> {
        if length < T::zero() {
            return Err(RangeMapError::NegativeLength);
        }
        let source = Interval::with_len(source_start, length).ok_or(RangeMapError::Overflow)?;
        let destination =
            Interval::with_len(destination_start, length).ok_or(RangeMapError::Overflow)?;
        Ok(Self {
            source,
            destination,
        })
    }

    /// Returns the source interval.
    #[inline]
    pub const fn source(&self) -> Interval<T> {
        self.source
    }

    /// Returns the destination interval.
    #[inline]
    pub const fn destination(&self) -> Interval<T> {
        self.destination
    }

    /// Returns the number of values covered by the rule.
    #[inline]
    pub fn len(&self) -> T {
        self.source.len()
    }

    /// Returns `true` if the rule covers no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Translates a single value, or returns `None` if it lies outside the source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_model::range_map::RangeMap;
    ///
    /// let rule = RangeMap::from_triple(52, 50, 48).unwrap();
    /// assert_eq!(rule.translate(79), Some(81));
    /// assert_eq!(rule.translate(98), None);
    /// ```
    #[inline]
    pub fn translate(&self, value: T) -> Option<T> {
        if self.source.contains_point(value) {
            Some(value - self.source.start() + self.destination.start())
        } else {
            None
        }
    }

    /// Translates an interval lying within the source into destination coordinates.
    ///
    /// The result always lies within the destination, so the arithmetic cannot
    /// overflow for intervals satisfying the precondition.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `interval` is not contained in the source.
    #[inline]
    pub fn translate_interval(&self, interval: Interval<T>) -> Interval<T> {
        debug_assert!(
            self.source.contains_interval(interval),
            "Interval must lie within the source range of the rule"
        );
        let origin = self.source.start();
        let target = self.destination.start();
        Interval::new_unchecked(
            interval.start() - origin + target,
            interval.end() - origin + target,
        )
    }
}

impl<T> std::fmt::Debug for RangeMap<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeMap")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .finish()
    }
}

impl<T> std::fmt::Display for RangeMap<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_triple() {
        let rule = RangeMap::from_triple(52, 50, 48).unwrap();
        assert_eq!(rule.source(), Interval::new(50, 98));
        assert_eq!(rule.destination(), Interval::new(52, 100));
        assert_eq!(rule.len(), 48);
        assert!(!rule.is_empty());
    }

    #[test]
    fn test_from_triple_rejects_negative_length() {
        assert_eq!(
            RangeMap::<i64>::from_triple(0, 0, -3),
            Err(RangeMapError::NegativeLength)
        );
    }

    #[test]
    fn test_from_triple_rejects_overflow() {
        assert_eq!(
            RangeMap::<u8>::from_triple(250, 0, 10),
            Err(RangeMapError::Overflow)
        );
        assert_eq!(
            RangeMap::<u8>::from_triple(0, 250, 10),
            Err(RangeMapError::Overflow)
        );
    }

    #[test]
    fn test_try_new_length_mismatch() {
        let res = RangeMap::try_new(Interval::new(0, 10), Interval::new(5, 6));
        assert_eq!(res, Err(RangeMapError::LengthMismatch));
    }

    #[test]
    #[should_panic(expected = "Invalid range map")]
    fn test_new_panics_on_length_mismatch() {
        RangeMap::new(Interval::new(0, 10), Interval::new(5, 6));
    }

    #[test]
    fn test_translate_bounds() {
        let rule = RangeMap::from_triple(50, 98, 2).unwrap();
        assert_eq!(rule.translate(97), None);
        assert_eq!(rule.translate(98), Some(50));
        assert_eq!(rule.translate(99), Some(51));
        assert_eq!(rule.translate(100), None);
    }

    #[test]
    fn test_translate_downwards_unsigned() {
        let rule = RangeMap::<u64>::from_triple(0, 15, 37).unwrap();
        assert_eq!(rule.translate(15), Some(0));
        assert_eq!(
            rule.translate_interval(Interval::new(20, 30)),
            Interval::new(5, 15)
        );
    }

    #[test]
    fn test_translate_interval_whole_source() {
        let rule = RangeMap::new(Interval::new(10, 20), Interval::new(100, 110));
        assert_eq!(
            rule.translate_interval(Interval::new(10, 20)),
            Interval::new(100, 110)
        );
    }

    #[test]
    fn test_display() {
        let rule = RangeMap::from_triple(50, 98, 2).unwrap();
        assert_eq!(format!("{}", rule), "[98, 100) -> [50, 52)");
    }
}
