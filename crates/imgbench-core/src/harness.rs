//! Benchmark harness: run every strategy over the same URL list and report
//! the elapsed time of each.

use std::time::Duration;

use crate::runner::RunContext;
use crate::strategy::Strategy;

/// Elapsed time of one strategy run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyTiming {
    pub strategy: Strategy,
    pub elapsed: Duration,
}

impl StrategyTiming {
    /// `<Label> download time: <seconds> seconds`.
    pub fn line(&self) -> String {
        format!(
            "{} download time: {} seconds",
            self.strategy.label(),
            self.elapsed.as_secs_f64()
        )
    }
}

/// Runs `strategies` in order. `on_timing` is called right after each run,
/// so output interleaves with the error lines of the next run.
pub fn run_strategies<F>(
    strategies: &[Strategy],
    urls: &[String],
    ctx: &RunContext,
    mut on_timing: F,
) -> Vec<StrategyTiming>
where
    F: FnMut(&StrategyTiming),
{
    let mut timings = Vec::with_capacity(strategies.len());
    for &strategy in strategies {
        let timing = StrategyTiming {
            strategy,
            elapsed: strategy.execute(urls, ctx),
        };
        on_timing(&timing);
        timings.push(timing);
    }
    timings
}

/// Runs all four strategies and prints each timing line to stdout.
pub fn run_all(urls: &[String], ctx: &RunContext) -> Vec<StrategyTiming> {
    run_strategies(&Strategy::ALL, urls, ctx, |t| println!("{}", t.line()))
}
