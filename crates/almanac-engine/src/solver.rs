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

//! # Lowest-Location Solver
//!
//! Runs a loaded [`Almanac`] through the remapping engine and reports the
//! smallest value that reaches the terminal category.
//!
//! ## Parallelism
//!
//! Seeds never interact while they travel down the chain, so they can be
//! resolved independently. With more than one thread configured, the seeds are
//! cut into contiguous chunks, each chunk is resolved on its own scoped thread
//! (`std::thread::scope`) against the shared chain, and the partial minimums
//! are combined. The answer is the same as for a single-threaded run.
//!
//! ## Usage
//!
//! ```rust
//! use almanac_core::math::interval::Interval;
//! use almanac_engine::solver::SolverBuilder;
//! use almanac_model::almanac::AlmanacBuilder;
//! use almanac_model::category_map::CategoryMap;
//! use almanac_model::range_map::RangeMap;
//!
//! let mut bldr = AlmanacBuilder::<i64>::new();
//! bldr.add_seed(Interval::new(5, 25)).add_category_map(CategoryMap::with_rules(
//!     "seed",
//!     "location",
//!     [RangeMap::from_triple(0, 5, 3).unwrap()],
//! ));
//! let almanac = bldr.build();
//!
//! let outcome = SolverBuilder::new().with_threads(2).build().solve(&almanac).unwrap();
//! assert_eq!(outcome.minimum(), 0);
//! ```

use crate::{
    engine::{lowest_start, resolve},
    error::EngineError,
    stats::{ResolutionStatistics, ResolutionStatisticsBuilder},
};
use almanac_core::math::interval::Interval;
use almanac_model::{
    almanac::Almanac,
    category::{Category, LOCATION, SEED},
    chain::Chain,
};
use num_traits::PrimInt;
use std::fmt::Display;

/// The result of a successful solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T> {
    minimum: T,
    statistics: ResolutionStatistics,
}

impl<T> SolverOutcome<T>
where
    T: Copy,
{
    #[inline]
    pub fn new(minimum: T, statistics: ResolutionStatistics) -> Self {
        Self {
            minimum,
            statistics,
        }
    }

    /// The smallest value in the terminal category.
    #[inline]
    pub fn minimum(&self) -> T {
        self.minimum
    }

    #[inline]
    pub fn statistics(&self) -> &ResolutionStatistics {
        &self.statistics
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Minimum: {}", self.minimum)?;
        write!(f, "{}", self.statistics)
    }
}

/// Resolves almanacs from a start category to an end category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solver {
    start_category: Category,
    end_category: Category,
    threads: usize,
}

impl Default for Solver {
    fn default() -> Self {
        SolverBuilder::new().build()
    }
}

impl Solver {
    #[inline]
    pub fn start_category(&self) -> &Category {
        &self.start_category
    }

    #[inline]
    pub fn end_category(&self) -> &Category {
        &self.end_category
    }

    /// The configured upper bound on worker threads.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Resolves all seeds of `almanac` and returns the smallest terminal value.
    ///
    /// # Errors
    ///
    /// Propagates every [`EngineError`] raised by the engine, and returns
    /// [`EngineError::MissingMinimum`] if no value reaches the end category.
    pub fn solve<T>(&self, almanac: &Almanac<T>) -> Result<SolverOutcome<T>, EngineError>
    where
        T: PrimInt + Display + Send + Sync,
    {
        let start_time = std::time::Instant::now();
        let seeds = almanac.seeds();
        let chain = almanac.chain();

        // Never spawn more threads than there are seeds to hand out.
        let threads = self.threads.clamp(1, seeds.len().max(1));

        tracing::debug!(
            start = %self.start_category,
            end = %self.end_category,
            seeds = seeds.len(),
            threads,
            "resolving almanac"
        );

        let (minimum, output_intervals) = if threads == 1 {
            self.resolve_chunk(seeds, chain)?
        } else {
            self.resolve_parallel(seeds, chain, threads)?
        };
        let minimum = minimum.ok_or(EngineError::MissingMinimum)?;

        let hops = chain
            .path(self.start_category.as_str(), self.end_category.as_str())
            .map_or(0, |path| path.len() - 1);

        let statistics = ResolutionStatisticsBuilder::new()
            .seeds(seeds.len())
            .output_intervals(output_intervals)
            .hops(hops)
            .used_threads(threads)
            .solve_duration(start_time.elapsed())
            .build();

        Ok(SolverOutcome::new(minimum, statistics))
    }

    /// Resolves one group of seeds, returning its lowest value and output size.
    fn resolve_chunk<T>(
        &self,
        seeds: &[Interval<T>],
        chain: &Chain<T>,
    ) -> Result<(Option<T>, usize), EngineError>
    where
        T: PrimInt + Display,
    {
        let out = resolve(
            seeds.to_vec(),
            self.start_category.as_str(),
            chain,
            self.end_category.as_str(),
        )?;
        Ok((lowest_start(&out), out.len()))
    }

    fn resolve_parallel<T>(
        &self,
        seeds: &[Interval<T>],
        chain: &Chain<T>,
        threads: usize,
    ) -> Result<(Option<T>, usize), EngineError>
    where
        T: PrimInt + Display + Send + Sync,
    {
        let chunk_size = seeds.len().div_ceil(threads);

        let partials: Vec<Result<(Option<T>, usize), EngineError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = seeds
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || self.resolve_chunk(chunk, chain)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().expect("resolver thread panicked"))
                .collect()
        });

        let mut minimum: Option<T> = None;
        let mut output_intervals = 0;
        for partial in partials {
            let (lowest, count) = partial?;
            output_intervals += count;
            minimum = match (minimum, lowest) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }
        Ok((minimum, output_intervals))
    }
}

/// Builder for [`Solver`].
///
/// Defaults: start category `seed`, end category `location`, one thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverBuilder {
    start_category: Category,
    end_category: Category,
    threads: usize,
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            start_category: Category::from(SEED),
            end_category: Category::from(LOCATION),
            threads: 1,
        }
    }

    #[inline]
    pub fn with_start_category(mut self, category: impl Into<Category>) -> Self {
        self.start_category = category.into();
        self
    }

    #[inline]
    pub fn with_end_category(mut self, category: impl Into<Category>) -> Self {
        self.end_category = category.into();
        self
    }

    /// Sets the maximum number of worker threads; `0` is treated as `1`.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    #[inline]
    pub fn build(self) -> Solver {
        Solver {
            start_category: self.start_category,
            end_category: self.end_category,
            threads: self.threads,
        }
    }
}
