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

/// Statistics collected while resolving an almanac.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionStatistics {
    /// Number of seed intervals fed into the chain.
    pub seeds: usize,
    /// Number of intervals that reached the terminal category.
    pub output_intervals: usize,
    /// Number of category maps applied to every interval.
    pub hops: usize,
    /// Number of threads used during the resolution.
    pub used_threads: usize,
    /// Total duration of the resolution.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for ResolutionStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Resolution Statistics:")?;
        writeln!(f, "  Seeds: {}", self.seeds)?;
        writeln!(f, "  Output Intervals: {}", self.output_intervals)?;
        writeln!(f, "  Hops: {}", self.hops)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `ResolutionStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionStatisticsBuilder {
    seeds: usize,
    output_intervals: usize,
    hops: usize,
    used_threads: usize,
    solve_duration: std::time::Duration,
}

impl Default for ResolutionStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionStatisticsBuilder {
    /// Creates a new `ResolutionStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            seeds: 0,
            output_intervals: 0,
            hops: 0,
            used_threads: 1,
            solve_duration: std::time::Duration::ZERO,
        }
    }

    #[inline]
    pub fn seeds(mut self, seeds: usize) -> Self {
        self.seeds = seeds;
        self
    }

    #[inline]
    pub fn output_intervals(mut self, output_intervals: usize) -> Self {
        self.output_intervals = output_intervals;
        self
    }

    #[inline]
    pub fn hops(mut self, hops: usize) -> Self {
        self.hops = hops;
        self
    }

    /// Sets the number of threads used.
    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.used_threads = used_threads;
        self
    }

    /// Sets the total solve duration.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    /// Builds the `ResolutionStatistics` instance.
    #[inline]
    pub fn build(self) -> ResolutionStatistics {
        ResolutionStatistics {
            seeds: self.seeds,
            output_intervals: self.output_intervals,
            hops: self.hops,
            used_threads: self.used_threads,
            solve_duration: self.solve_duration,
        }
    }
}
