//! Execution strategy selector: one call signature, four execution models.

use std::fmt;
use std::time::Duration;

use crate::runner::{self, RunContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Sequential,
    ThreadPool,
    ProcessPool,
    CooperativeAsync,
}

impl Strategy {
    /// All strategies in the order the harness runs them.
    pub const ALL: [Strategy; 4] = [
        Strategy::Sequential,
        Strategy::ThreadPool,
        Strategy::ProcessPool,
        Strategy::CooperativeAsync,
    ];

    /// Label used in the timing line.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Sequential => "Sync",
            Strategy::ThreadPool => "Threaded",
            Strategy::ProcessPool => "Process",
            Strategy::CooperativeAsync => "Async",
        }
    }

    /// Applies the fetcher to every URL under this strategy and returns the
    /// wall-clock time. Per-URL failures never surface here.
    pub fn execute(self, urls: &[String], ctx: &RunContext) -> Duration {
        tracing::info!(strategy = self.label(), urls = urls.len(), "starting run");
        let elapsed = match self {
            Strategy::Sequential => runner::run_sequential(urls, ctx),
            Strategy::ThreadPool => runner::run_thread_pool(urls, ctx),
            Strategy::ProcessPool => runner::run_process_pool(urls, ctx),
            Strategy::CooperativeAsync => runner::run_cooperative(urls, ctx),
        };
        tracing::info!(
            strategy = self.label(),
            elapsed_secs = elapsed.as_secs_f64(),
            "run finished"
        );
        elapsed
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
