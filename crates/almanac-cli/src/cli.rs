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

use std::path::PathBuf;

use almanac_model::{
    category::{LOCATION, SEED},
    loading::SeedMode,
};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about = "Finds the lowest location reachable from an almanac's seeds")]
pub struct Args {
    /// Almanac file to solve
    #[clap(long, env = "ALMANAC_INPUT", value_name = "FILE")]
    pub input_path: PathBuf,

    /// How the numbers on the `seeds:` line are read
    #[clap(long, env = "ALMANAC_SEED_MODE", value_enum, default_value_t = SeedModeArg::Ranges)]
    pub seed_mode: SeedModeArg,

    /// Upper bound on resolver threads
    #[clap(short, long, env = "ALMANAC_THREADS", default_value_t = 1)]
    pub threads: usize,

    /// Fail when two rules of one map cover the same source values
    #[clap(long, env = "ALMANAC_REJECT_OVERLAPPING_RULES")]
    pub reject_overlapping_rules: bool,

    #[clap(long, default_value = SEED, hide_default_value(true))]
    pub start_category: String,

    #[clap(long, default_value = LOCATION, hide_default_value(true))]
    pub end_category: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedModeArg {
    /// Pairs of `start length`
    Ranges,
    /// Every number is a single seed
    Points,
}

impl From<SeedModeArg> for SeedMode {
    fn from(arg: SeedModeArg) -> Self {
        match arg {
            SeedModeArg::Ranges => SeedMode::Ranges,
            SeedModeArg::Points => SeedMode::Points,
        }
    }
}
