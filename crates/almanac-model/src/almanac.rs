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

use crate::{category_map::CategoryMap, chain::Chain};
use almanac_core::math::interval::Interval;
use num_traits::PrimInt;

/// A loaded almanac: the seed intervals and the chain of category maps.
///
/// An `Almanac` is immutable once built. Use [`AlmanacBuilder`] or
/// [`crate::loading::AlmanacLoader`] to create one.
#[derive(Clone)]
pub struct Almanac<T>
where
    T: PrimInt,
{
    seeds: Vec<Interval<T>>,
    chain: Chain<T>,
}

impl<T> Almanac<T>
where
    T: PrimInt,
{
    /// The seed intervals, in input order.
    #[inline]
    pub fn seeds(&self) -> &[Interval<T>] {
        &self.seeds
    }

    #[inline]
    pub fn num_seeds(&self) -> usize {
        self.seeds.len()
    }

    /// The category maps, keyed by source category.
    #[inline]
    pub fn chain(&self) -> &Chain<T> {
        &self.chain
    }

    /// Returns the total number of seed values across all seed intervals.
    ///
    /// Returns `None` if the count does not fit into `T`.
    pub fn num_seed_values(&self) -> Option<T> {
        self.seeds
            .iter()
            .try_fold(T::zero(), |acc, seed| acc.checked_add(&seed.len()))
    }

    /// Consumes the almanac, returning its seeds and chain.
    #[inline]
    pub fn into_parts(self) -> (Vec<Interval<T>>, Chain<T>) {
        (self.seeds, self.chain)
    }
}

impl<T> std::fmt::Debug for Almanac<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Almanac")
            .field("seeds", &self.seeds)
            .field("chain", &self.chain)
            .finish()
    }
}

impl<T> std::fmt::Display for Almanac<T>
where
    T: PrimInt,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Almanac(num_seeds: {}, num_maps: {})",
            self.seeds.len(),
            self.chain.len()
        )
    }
}

/// A mutable builder for [`Almanac`].
#[derive(Clone)]
pub struct AlmanacBuilder<T>
where
    T: PrimInt,
{
    seeds: Vec<Interval<T>>,
    chain: Chain<T>,
}

impl<T> Default for AlmanacBuilder<T>
where
    T: PrimInt,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AlmanacBuilder<T>
where
    T: PrimInt,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            seeds: Vec::new(),
            chain: Chain::new(),
        }
    }

    #[inline]
    pub fn add_seed(&mut self, seed: Interval<T>) -> &mut Self {
        self.seeds.push(seed);
        self
    }

    #[inline]
    pub fn add_seeds<I>(&mut self, seeds: I) -> &mut Self
    where
        I: IntoIterator<Item = Interval<T>>,
    {
        self.seeds.extend(seeds);
        self
    }

    /// Adds a category map to the chain.
    ///
    /// # Panics
    ///
    /// Panics if a map with the same source category was already added.
    /// Use [`AlmanacBuilder::contains_source`] to check beforehand.
    pub fn add_category_map(&mut self, map: CategoryMap<T>) -> &mut Self {
        assert!(
            !self.chain.contains(map.source().as_str()),
            "Duplicate category map for source category `{}`",
            map.source()
        );
        self.chain.insert(map);
        self
    }

    /// Returns `true` if a map out of `category` has already been added.
    #[inline]
    pub fn contains_source(&self, category: &str) -> bool {
        self.chain.contains(category)
    }

    #[inline]
    pub fn num_seeds(&self) -> usize {
        self.seeds.len()
    }

    #[inline]
    pub fn num_maps(&self) -> usize {
        self.chain.len()
    }

    #[inline]
    pub fn build(self) -> Almanac<T> {
        Almanac {
            seeds: self.seeds,
            chain: self.chain,
        }
    }
}
