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

//! # Almanac Model
//!
//! **The domain model for the seed-to-location remapping engine.**
//!
//! This crate defines the data structures the engine consumes: seed intervals,
//! remapping rules, named category maps and the chain that links them. It also
//! owns the text loader that produces a validated [`almanac::Almanac`].
//!
//! ## Architecture
//!
//! * **`category`**: Category names (`seed`, `soil`, ..., `location`) as an owned, hashable newtype.
//! * **`range_map`**: A single `source -> destination` rule with checked construction.
//! * **`category_map`**: A named, ordered table of rules with identity fallback for uncovered values.
//! * **`chain`**: Tables keyed by source category, with a bounded walk from start to end.
//! * **`almanac`**: The immutable `Almanac` (seeds plus chain) and its `AlmanacBuilder`.
//! * **`loading`**: `AlmanacLoader`, the line-oriented text parser.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: Constructors validate lengths and overflow eagerly; the loader reports the offending line.
//! 2.  **Immutability**: An `Almanac` never changes after it is built; the engine derives new interval sets from it.
//! 3.  **No hidden checks**: Rule sources are assumed disjoint. Overlap detection is an explicit, opt-in step.

pub mod almanac;
pub mod category;
pub mod category_map;
pub mod chain;
pub mod loading;
pub mod range_map;
