#![allow(dead_code)]

pub mod image_server;

use imgbench_core::fetcher::FetchOptions;
use imgbench_core::runner::{RunContext, WorkerCommand};
use std::path::Path;

/// Context writing into `dir`, with a process-pool worker that cannot be launched
/// (the core crate has no worker binary; the CLI crate tests the real one).
pub fn context(dir: &Path, workers: usize) -> RunContext {
    RunContext {
        fetch: FetchOptions::new(dir),
        thread_workers: workers,
        process_workers: workers,
        blocking_threads: workers,
        worker: WorkerCommand::new(dir.join("no-worker-here")),
    }
}
