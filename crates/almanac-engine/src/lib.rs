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

//! # Almanac Engine
//!
//! The interval-remapping engine. Given seed intervals and a chain of category
//! maps, it pushes whole intervals (not individual values) through every map
//! from the start category to the terminal one, then reports the smallest
//! value that arrives.
//!
//! ## Modules
//!
//! - `engine`: The split, apply, resolve and minimum stages.
//! - `error`: `EngineError`, the fatal failures of a run.
//! - `solver`: `Solver` and `SolverBuilder`, which run an `Almanac` end to end,
//!   optionally spreading seeds over scoped threads.
//! - `stats`: `ResolutionStatistics` reported alongside the answer.

pub mod engine;
pub mod error;
pub mod solver;
pub mod stats;
