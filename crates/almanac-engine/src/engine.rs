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

//! # Interval Remapping Engine
//!
//! The four stages that carry seed intervals to their terminal category:
//!
//! - [`split`]: cuts one interval against one rule into the part the rule does
//!   not cover (unchanged) and the part it does (translated).
//! - [`apply`]: runs every rule of a category map over a set of intervals,
//!   letting uncovered values through unchanged.
//! - [`resolve`]: walks the chain from a start category to an end category,
//!   bounded by the number of maps in the chain.
//! - [`minimum_start`]: the smallest value in the resulting interval set.
//!
//! Output intervals are never merged. They may overlap or be non-contiguous,
//! which does not affect the minimum.

use crate::error::EngineError;
use almanac_core::math::interval::{Interval, Overlap};
use almanac_model::{category_map::CategoryMap, chain::Chain, range_map::RangeMap};
use num_traits::PrimInt;
use smallvec::{SmallVec, smallvec};
use std::fmt::Display;

/// At most two pieces fall on either side of a split.
pub type Pieces<T> = SmallVec<[Interval<T>; 2]>;

/// The result of splitting one interval against one rule.
///
/// The lengths of all pieces add up to the length of the split interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<T>
where
    T: PrimInt,
{
    /// Pieces outside the rule's source, in source coordinates.
    pub unmapped: Pieces<T>,
    /// Pieces inside the rule's source, translated into destination coordinates.
    pub mapped: Pieces<T>,
}

/// Splits `interval` against the source range of `rule`.
///
/// # Errors
///
/// Returns [`EngineError::InvariantViolation`] if the pair matches none of the
/// five overlap cases, which can only happen for malformed intervals.
///
/// # Examples
///
/// ```rust
/// # use almanac_core::math::interval::Interval;
/// # use almanac_engine::engine::split;
/// # use almanac_model::range_map::RangeMap;
///
/// let rule = RangeMap::new(Interval::new(10, 20), Interval::new(100, 110));
/// let s = split(Interval::new(5, 25), &rule).unwrap();
/// assert_eq!(s.unmapped.as_slice(), &[Interval::new(5, 10), Interval::new(20, 25)]);
/// assert_eq!(s.mapped.as_slice(), &[Interval::new(100, 110)]);
/// ```
pub fn split<T>(interval: Interval<T>, rule: &RangeMap<T>) -> Result<Split<T>, EngineError>
where
    T: PrimInt + Display,
{
    let src = rule.source();
    let overlap = interval
        .overlap(src)
        .ok_or_else(|| EngineError::InvariantViolation {
            interval: interval.to_string(),
            source_range: src.to_string(),
        })?;

    let split = match overlap {
        Overlap::Disjoint => Split {
            unmapped: smallvec![interval],
            mapped: SmallVec::new(),
        },
        Overlap::Contained => Split {
            unmapped: SmallVec::new(),
            mapped: smallvec![rule.translate_interval(interval)],
        },
        Overlap::OverflowRight => Split {
            unmapped: smallvec![Interval::new_unchecked(src.end(), interval.end())],
            mapped: smallvec![
                rule.translate_interval(Interval::new_unchecked(interval.start(), src.end()))
            ],
        },
        Overlap::OverflowLeft => Split {
            unmapped: smallvec![Interval::new_unchecked(interval.start(), src.start())],
            mapped: smallvec![
                rule.translate_interval(Interval::new_unchecked(src.start(), interval.end()))
            ],
        },
        Overlap::StrictlyContains => Split {
            unmapped: smallvec![
                Interval::new_unchecked(interval.start(), src.start()),
                Interval::new_unchecked(src.end(), interval.end()),
            ],
            mapped: smallvec![rule.destination()],
        },
    };
    Ok(split)
}

/// Applies every rule of `table` to `intervals`.
///
/// Rules are processed in listed order. Pieces a rule translates are final;
/// pieces it leaves alone are offered to the next rule. Whatever no rule takes
/// passes through unchanged. The result holds the translated pieces first,
/// followed by the untouched remainder.
pub fn apply<T>(
    intervals: Vec<Interval<T>>,
    table: &CategoryMap<T>,
) -> Result<Vec<Interval<T>>, EngineError>
where
    T: PrimInt + Display,
{
    let mut unmapped = intervals;
    let mut next = Vec::with_capacity(unmapped.len());
    let mut mapped = Vec::with_capacity(unmapped.len());

    for rule in table.rules() {
        next.clear();
        for &interval in &unmapped {
            let pieces = split(interval, rule)?;
            next.extend(pieces.unmapped);
            mapped.extend(pieces.mapped);
        }
        std::mem::swap(&mut unmapped, &mut next);
    }

    mapped.append(&mut unmapped);
    Ok(mapped)
}

/// Carries `initial` from category `start` to category `end`.
///
/// At most `chain.len()` maps are applied, so a cyclic chain terminates.
///
/// # Errors
///
/// - [`EngineError::MissingCategory`] if no map leaves a category on the way.
/// - [`EngineError::ChainIncomplete`] if `end` is not reached within the bound.
/// - Any error raised by [`apply`].
pub fn resolve<T>(
    initial: Vec<Interval<T>>,
    start: &str,
    chain: &Chain<T>,
    end: &str,
) -> Result<Vec<Interval<T>>, EngineError>
where
    T: PrimInt + Display,
{
    let mut current = initial;
    let mut key = start;

    for _ in 0..chain.len() {
        let table = chain
            .get(key)
            .ok_or_else(|| EngineError::MissingCategory {
                category: key.to_owned(),
            })?;

        current = apply(current, table)?;
        key = table.destination().as_str();

        tracing::debug!(
            from = %table.source(),
            to = %table.destination(),
            intervals = current.len(),
            "applied category map"
        );

        if key == end {
            return Ok(current);
        }
    }

    Err(EngineError::ChainIncomplete {
        start: start.to_owned(),
        end: end.to_owned(),
        steps: chain.len(),
    })
}

/// Returns the smallest start among the intervals that carry values.
///
/// Empty intervals hold no values and are skipped.
#[inline]
pub fn lowest_start<T>(intervals: &[Interval<T>]) -> Option<T>
where
    T: PrimInt,
{
    intervals
        .iter()
        .filter(|iv| !iv.is_empty())
        .map(Interval::start)
        .min()
}

/// Returns the smallest value held by `intervals`.
///
/// # Errors
///
/// Returns [`EngineError::MissingMinimum`] if no interval carries a value.
#[inline]
pub fn minimum_start<T>(intervals: &[Interval<T>]) -> Result<T, EngineError>
where
    T: PrimInt,
{
    lowest_start(intervals).ok_or(EngineError::MissingMinimum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn iv(start: i64, end: i64) -> Interval<i64> {
        Interval::new(start, end)
    }

    fn total_len(pieces: &[Interval<i64>]) -> i64 {
        pieces.iter().map(|p| p.len()).sum()
    }

    fn rule_10_20() -> RangeMap<i64> {
        RangeMap::new(iv(10, 20), iv(100, 110))
    }

    fn chain_of(maps: Vec<CategoryMap<i64>>) -> Chain<i64> {
        let mut chain = Chain::new();
        for m in maps {
            chain.insert(m);
        }
        chain
    }

    #[test]
    fn test_split_full_containment() {
        let s = split(iv(10, 20), &rule_10_20()).unwrap();
        assert!(s.unmapped.is_empty());
        assert_eq!(s.mapped.as_slice(), &[iv(100, 110)]);
    }

    #[test]
    fn test_split_left_and_right_overflow() {
        let s = split(iv(5, 25), &rule_10_20()).unwrap();
        assert_eq!(s.unmapped.as_slice(), &[iv(5, 10), iv(20, 25)]);
        assert_eq!(s.mapped.as_slice(), &[iv(100, 110)]);
    }

    #[test]
    fn test_split_disjoint() {
        let s = split(iv(0, 5), &rule_10_20()).unwrap();
        assert_eq!(s.unmapped.as_slice(), &[iv(0, 5)]);
        assert!(s.mapped.is_empty());

        // Touching the end of the source is still disjoint.
        let s = split(iv(20, 30), &rule_10_20()).unwrap();
        assert_eq!(s.unmapped.as_slice(), &[iv(20, 30)]);
        assert!(s.mapped.is_empty());
    }

    #[test]
    fn test_split_overflow_right() {
        let s = split(iv(15, 25), &rule_10_20()).unwrap();
        assert_eq!(s.unmapped.as_slice(), &[iv(20, 25)]);
        assert_eq!(s.mapped.as_slice(), &[iv(105, 110)]);
    }

    #[test]
    fn test_split_overflow_left() {
        let s = split(iv(5, 15), &rule_10_20()).unwrap();
        assert_eq!(s.unmapped.as_slice(), &[iv(5, 10)]);
        assert_eq!(s.mapped.as_slice(), &[iv(100, 105)]);

        // Ending exactly on the source end.
        let s = split(iv(5, 20), &rule_10_20()).unwrap();
        assert_eq!(s.unmapped.as_slice(), &[iv(5, 10)]);
        assert_eq!(s.mapped.as_slice(), &[iv(100, 110)]);
    }

    #[test]
    fn test_split_strictly_inside_source() {
        let s = split(iv(12, 18), &rule_10_20()).unwrap();
        assert!(s.unmapped.is_empty());
        assert_eq!(s.mapped.as_slice(), &[iv(102, 108)]);
    }

    #[test]
    fn test_split_translates_downwards_unsigned() {
        let rule = RangeMap::<u64>::from_triple(0, 15, 37).unwrap();
        let s = split(Interval::new(10u64, 20), &rule).unwrap();
        assert_eq!(s.unmapped.as_slice(), &[Interval::new(10, 15)]);
        assert_eq!(s.mapped.as_slice(), &[Interval::new(0, 5)]);
    }

    #[test]
    fn test_split_conserves_length() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2_000 {
            let r_start = rng.random_range(-50..50);
            let r = iv(r_start, r_start + rng.random_range(0..40));
            let src_start = rng.random_range(-50..50);
            let len = rng.random_range(0..40);
            let dst_start = rng.random_range(-1_000..1_000);
            let rule = RangeMap::from_triple(dst_start, src_start, len).unwrap();

            let s = split(r, &rule).unwrap();
            assert_eq!(
                total_len(&s.unmapped) + total_len(&s.mapped),
                r.len(),
                "length not conserved for {} against {}",
                r,
                rule
            );
            for piece in &s.unmapped {
                assert!(r.contains_interval(*piece));
                assert!(!piece.intersects(rule.source()));
            }
            for piece in &s.mapped {
                assert!(rule.destination().contains_interval(*piece) || piece.is_empty());
            }
        }
    }

    #[test]
    fn test_apply_identity_fallback() {
        let table = CategoryMap::with_rules("a", "b", [rule_10_20()]);
        let out = apply(vec![iv(30, 40), iv(0, 3)], &table).unwrap();
        assert_eq!(out, vec![iv(30, 40), iv(0, 3)]);
    }

    #[test]
    fn test_apply_without_rules_is_identity() {
        let table = CategoryMap::<i64>::new("a", "b");
        let out = apply(vec![iv(1, 2), iv(7, 9)], &table).unwrap();
        assert_eq!(out, vec![iv(1, 2), iv(7, 9)]);
    }

    #[test]
    fn test_apply_mapped_first_then_remainder() {
        let table = CategoryMap::with_rules("a", "b", [rule_10_20()]);
        let out = apply(vec![iv(5, 25)], &table).unwrap();
        assert_eq!(out, vec![iv(100, 110), iv(5, 10), iv(20, 25)]);
    }

    #[test]
    fn test_apply_pieces_are_not_remapped_by_later_rules() {
        // The first rule moves [0, 10) onto [10, 20); the second rule covers
        // [10, 20) but must only see values that were originally there.
        let table = CategoryMap::with_rules(
            "a",
            "b",
            [
                RangeMap::from_triple(10, 0, 10).unwrap(),
                RangeMap::from_triple(500, 10, 10).unwrap(),
            ],
        );
        let out = apply(vec![iv(0, 20)], &table).unwrap();
        assert_eq!(out, vec![iv(10, 20), iv(500, 510)]);
    }

    #[test]
    fn test_apply_sample_seed_to_soil() {
        let table = CategoryMap::with_rules(
            "seed",
            "soil",
            [
                RangeMap::from_triple(50, 98, 2).unwrap(),
                RangeMap::from_triple(52, 50, 48).unwrap(),
            ],
        );
        let out = apply(vec![iv(79, 93), iv(55, 68)], &table).unwrap();
        assert_eq!(out, vec![iv(81, 95), iv(57, 70)]);
    }

    #[test]
    fn test_apply_agrees_with_pointwise_mapping() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            // Disjoint sources laid out left to right, listed in shuffled order.
            let mut rules = Vec::new();
            let mut cursor = rng.random_range(0..10);
            for _ in 0..rng.random_range(0..5) {
                let len = rng.random_range(1..8);
                rules.push(RangeMap::from_triple(rng.random_range(0..100), cursor, len).unwrap());
                cursor += len + rng.random_range(0..4);
            }
            if rules.len() > 1 {
                let i = rng.random_range(0..rules.len());
                rules.swap(0, i);
            }
            let table = CategoryMap::with_rules("a", "b", rules);

            let start = rng.random_range(0..30);
            let input = iv(start, start + rng.random_range(0..20));
            let out = apply(vec![input], &table).unwrap();

            let mut got: Vec<i64> = out.iter().flat_map(|p| p.start()..p.end()).collect();
            let mut want: Vec<i64> = (input.start()..input.end())
                .map(|v| table.map_value(v))
                .collect();
            got.sort_unstable();
            want.sort_unstable();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_resolve_two_hops() {
        let chain = chain_of(vec![
            CategoryMap::with_rules("seed", "soil", [rule_10_20()]),
            CategoryMap::with_rules(
                "soil",
                "location",
                [RangeMap::from_triple(0, 100, 5).unwrap()],
            ),
        ]);
        let out = resolve(vec![iv(12, 14), iv(40, 41)], "seed", &chain, "location").unwrap();
        assert_eq!(out, vec![iv(2, 4), iv(40, 41)]);
        assert_eq!(minimum_start(&out), Ok(2));
    }

    #[test]
    fn test_resolve_missing_category() {
        let chain = chain_of(vec![
            CategoryMap::new("seed", "soil"),
            CategoryMap::new("water", "location"),
        ]);
        let res = resolve(vec![iv(0, 1)], "seed", &chain, "location");
        assert_eq!(
            res,
            Err(EngineError::MissingCategory {
                category: "soil".to_owned()
            })
        );
    }

    #[test]
    fn test_resolve_cycle_is_chain_incomplete() {
        let chain = chain_of(vec![
            CategoryMap::new("seed", "soil"),
            CategoryMap::new("soil", "water"),
            CategoryMap::new("water", "soil"),
        ]);
        let res = resolve(vec![iv(0, 1)], "seed", &chain, "location");
        assert_eq!(
            res,
            Err(EngineError::ChainIncomplete {
                start: "seed".to_owned(),
                end: "location".to_owned(),
                steps: 3,
            })
        );
    }

    #[test]
    fn test_resolve_empty_chain() {
        let chain = Chain::<i64>::new();
        let res = resolve(vec![iv(0, 1)], "seed", &chain, "location");
        assert!(matches!(res, Err(EngineError::ChainIncomplete { steps: 0, .. })));
    }

    #[test]
    fn test_minimum_start() {
        assert_eq!(minimum_start(&[iv(46, 56), iv(60, 61), iv(82, 85)]), Ok(46));
        assert_eq!(minimum_start::<i64>(&[]), Err(EngineError::MissingMinimum));
    }

    #[test]
    fn test_minimum_start_skips_empty_intervals() {
        assert_eq!(minimum_start(&[iv(3, 3), iv(10, 12)]), Ok(10));
        assert_eq!(
            minimum_start(&[iv(3, 3), iv(5, 5)]),
            Err(EngineError::MissingMinimum)
        );
    }
}
