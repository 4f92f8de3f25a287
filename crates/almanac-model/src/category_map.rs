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

//! Named remapping tables.
//!
//! A `CategoryMap` translates values of one category into values of another.
//! Each rule covers a slice of the source category; values that no rule covers
//! keep their numeric value across the category boundary.
//!
//! Rules are stored in the order they were listed. Their source intervals are
//! expected to be mutually disjoint, but this is not enforced on construction;
//! [`CategoryMap::find_overlap`] is available for callers that want to check.

use crate::{category::Category, range_map::RangeMap};
use num_traits::PrimInt;

/// A table of remapping rules from a `source` category into a `destination` category.
#[derive(Clone, PartialEq, Eq)]
pub struct CategoryMap<T>
where
    T: PrimInt,
{
    source: Category,
    destination: Category,
    rules: Vec<RangeMap<T>>,
}

impl<T> CategoryMap<T>
where
    T: PrimInt,
{
    /// Creates a table without any rules; it maps every value to itself.
    #[inline]
    pub fn new(source: impl Into<Category>, destination: impl Into<Category>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            rules: Vec::new(),
        }
    }

    /// Creates a table with the given rules, kept in iteration order.
    #[inline]
    pub fn with_rules<I>(
        source: impl Into<Category>,
        destination: impl Into<Category>,
        rules: I,
    ) -> Self
    where
        I: IntoIterator<Item = RangeMap<T>>,
    {
        Self {
            source: source.into(),
            destination: destination.into(),
            rules: rules.into_iter().collect(),
        }
    }

    /// Appends a rule to the table.
    #[inline]
    pub fn push_rule(&mut self, rule: RangeMap<T>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// The category this table translates from.
    #[inline]
    pub fn source(&self) -> &Category {
        &self.source
    }

    /// The category this table translates into.
    #[inline]
    pub fn destination(&self) -> &Category {
        &self.destination
    }

    /// The rules in listed order.
    #[inline]
    pub fn rules(&self) -> &[RangeMap<T>] {
        &self.rules
    }

    #[inline]
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    /// Translates a single value.
    ///
    /// The first rule whose source contains `value` wins; uncovered values are
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_model::category_map::CategoryMap;
    /// # use almanac_model::range_map::RangeMap;
    ///
    /// let map = CategoryMap::with_rules(
    ///     "seed",
    ///     "soil",
    ///     [
    ///         RangeMap::from_triple(50, 98, 2).unwrap(),
    ///         RangeMap::from_triple(52, 50, 48).unwrap(),
    ///     ],
    /// );
    /// assert_eq!(map.map_value(79), 81);
    /// assert_eq!(map.map_value(13), 13);
    /// ```
    pub fn map_value(&self, value: T) -> T {
        self.rules
            .iter()
            .find_map(|rule| rule.translate(value))
            .unwrap_or(value)
    }

    /// Returns the indices `(i, j)` with `i < j` of the first pair of rules whose
    /// source intervals share a value, or `None` if all sources are disjoint.
    ///
    /// "First" is with respect to the sorted order of source starts.
    pub fn find_overlap(&self) -> Option<(usize, usize)> {
        let mut order: Vec<usize> = (0..self.rules.len())
            .filter(|&i| !self.rules[i].is_empty())
            .collect();
        order.sort_by_key(|&i| (self.rules[i].source().start(), i));

        // After sorting, any overlap shows up between a rule and the rule
        // reaching furthest to the right among its predecessors.
        let mut reach: Option<usize> = None;
        for &i in &order {
            if let Some(r) = reach {
                if self.rules[r].source().intersects(self.rules[i].source()) {
                    return Some((r.min(i), r.max(i)));
                }
                if self.rules[i].source().end() > self.rules[r].source().end() {
                    reach = Some(i);
                }
            } else {
                reach = Some(i);
            }
        }
        None
    }
}

impl<T> std::fmt::Debug for CategoryMap<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryMap")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("rules", &self.rules)
            .finish()
    }
}

impl<T> std::fmt::Display for CategoryMap<T>
where
    T: PrimInt,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CategoryMap({}-to-{}, num_rules: {})",
            self.source,
            self.destination,
            self.rules.len()
        )
    }
}
