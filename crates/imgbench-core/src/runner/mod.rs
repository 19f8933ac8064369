//! The four execution strategies.
//!
//! Every runner takes the same ordered URL list, applies the fetcher to each
//! URL under its own execution model, discards per-URL results and returns
//! the wall-clock time around the whole batch.

mod cooperative;
mod process_pool;
mod sequential;
mod thread_pool;

pub use cooperative::{run_cooperative, run_cooperative_in};
pub use process_pool::{run_process_pool, worker_args, WorkerCommand, WORKER_BIN_NAME};
pub use sequential::run_sequential;
pub use thread_pool::run_thread_pool;

use crate::config::BenchConfig;
use crate::fetcher::FetchOptions;

/// Everything a runner needs. Built once by the harness and shared by reference.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub fetch: FetchOptions,
    /// Worker threads for the thread-pool runner.
    pub thread_workers: usize,
    /// Concurrent child processes for the process-pool runner.
    pub process_workers: usize,
    /// Blocking threads the cooperative runner offloads GETs to.
    pub blocking_threads: usize,
    /// Program launched once per URL by the process-pool runner.
    pub worker: WorkerCommand,
}

impl RunContext {
    pub fn from_config(cfg: &BenchConfig, fetch: FetchOptions, worker: WorkerCommand) -> Self {
        Self {
            fetch,
            thread_workers: cfg.thread_workers(),
            process_workers: cfg.process_workers(),
            blocking_threads: cfg.blocking_threads(),
            worker,
        }
    }
}

/// Pool size actually used for `jobs` units: never above the job count, never zero.
pub(crate) fn effective_workers(requested: usize, jobs: usize) -> usize {
    requested.min(jobs).max(1)
}
