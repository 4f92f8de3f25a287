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

/// The ways a remapping run can fail.
///
/// None of these are recoverable: each one aborts the computation, and no
/// partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The chain has no map out of the category reached so far.
    #[error("Missing map from category `{category}`")]
    MissingCategory { category: String },
    /// The walk used up its step bound without reaching the terminal category.
    /// This is what a cyclic chain runs into.
    #[error("Maps starting at `{start}` do not reach `{end}` within {steps} steps")]
    ChainIncomplete {
        start: String,
        end: String,
        steps: usize,
    },
    /// The final interval set carries no values, so there is no minimum.
    #[error("No values reached the terminal category; cannot take a minimum")]
    MissingMinimum,
    /// An interval and a rule source matched none of the split cases.
    /// Only malformed intervals can cause this.
    #[error("Interval {interval} and rule source {source_range} match none of the split cases")]
    InvariantViolation {
        interval: String,
        source_range: String,
    },
}
