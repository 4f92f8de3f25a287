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

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use almanac_engine::solver::SolverBuilder;
use almanac_model::loading::{AlmanacLoader, SeedMode};

use crate::cli::Args;

mod cli;

fn setup_tracing() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).unwrap_or("info".to_string()),
    );
    let fmt = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(fmt).try_init()?;
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let seed_mode = SeedMode::from(args.seed_mode);
    let almanac = AlmanacLoader::<i64>::new()
        .seed_mode(seed_mode)
        .reject_overlapping_rules(args.reject_overlapping_rules)
        .from_path(&args.input_path)
        .with_context(|| format!("failed to load almanac from {}", args.input_path.display()))?;
    tracing::info!(
        seeds = almanac.num_seeds(),
        maps = almanac.chain().len(),
        mode = %seed_mode,
        "Loaded almanac"
    );

    let solver = SolverBuilder::new()
        .with_start_category(args.start_category)
        .with_end_category(args.end_category)
        .with_threads(args.threads)
        .build();
    let outcome = solver.solve(&almanac).with_context(|| {
        format!(
            "failed to resolve {} to {}",
            solver.start_category(),
            solver.end_category()
        )
    })?;

    let stats = outcome.statistics();
    tracing::info!(
        hops = stats.hops,
        output_intervals = stats.output_intervals,
        threads = stats.used_threads,
        duration = ?stats.solve_duration,
        "Resolved almanac"
    );
    println!("{}", outcome.minimum());
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = setup_tracing() {
        eprintln!("Failed to initialize logging: {e:?}");
    }

    if let Err(e) = run(args) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
