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

use crate::{category::Category, category_map::CategoryMap};
use num_traits::PrimInt;
use rustc_hash::FxHashMap;

/// The category maps of an almanac, keyed by their source category.
///
/// Valid input forms a simple path from a start category to a terminal one.
/// `Chain` does not enforce this; traversal is bounded by [`Chain::len`]
/// instead, so cycles and dead ends are detected by whoever walks the chain.
#[derive(Clone)]
pub struct Chain<T>
where
    T: PrimInt,
{
    maps: FxHashMap<Category, CategoryMap<T>>,
}

impl<T> Default for Chain<T>
where
    T: PrimInt,
{
    fn default() -> Self {
        Self {
            maps: FxHashMap::default(),
        }
    }
}

impl<T> Chain<T>
where
    T: PrimInt,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table under its source category, returning the table it replaced.
    #[inline]
    pub fn insert(&mut self, map: CategoryMap<T>) -> Option<CategoryMap<T>> {
        self.maps.insert(map.source().clone(), map)
    }

    /// Returns the table translating out of `category`.
    #[inline]
    pub fn get(&self, category: &str) -> Option<&CategoryMap<T>> {
        self.maps.get(category)
    }

    #[inline]
    pub fn contains(&self, category: &str) -> bool {
        self.maps.contains_key(category)
    }

    /// Returns the number of tables.
    #[inline]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Iterates over the tables in unspecified order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &CategoryMap<T>> {
        self.maps.values()
    }

    /// Returns the categories visited when walking from `start` to `end`,
    /// both included.
    ///
    /// The walk takes at most [`Chain::len`] steps. Returns `None` if a table is
    /// missing along the way or if `end` is not reached within the bound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use almanac_model::category_map::CategoryMap;
    /// # use almanac_model::chain::Chain;
    ///
    /// let mut chain = Chain::<i64>::new();
    /// chain.insert(CategoryMap::new("seed", "soil"));
    /// chain.insert(CategoryMap::new("soil", "location"));
    /// assert_eq!(chain.path("seed", "location"), Some(vec!["seed", "soil", "location"]));
    /// ```
    pub fn path<'a>(&'a self, start: &'a str, end: &str) -> Option<Vec<&'a str>> {
        let mut path = vec![start];
        let mut key = start;
        for _ in 0..self.maps.len() {
            let map = self.maps.get(key)?;
            key = map.destination().as_str();
            path.push(key);
            if key == end {
                return Some(path);
            }
        }
        None
    }
}

impl<T> std::fmt::Debug for Chain<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("maps", &self.maps).finish()
    }
}
