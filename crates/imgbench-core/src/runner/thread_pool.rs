//! Bounded pool of OS threads pulling URLs from a shared queue.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::fetcher;

use super::{effective_workers, RunContext};

/// Runs the fetcher over `urls` on up to `ctx.thread_workers` threads.
/// Blocks until every worker has joined.
pub fn run_thread_pool(urls: &[String], ctx: &RunContext) -> Duration {
    let start = Instant::now();
    let num_workers = effective_workers(ctx.thread_workers, urls.len());
    let work: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(urls.iter().cloned().collect()));

    let mut handles = Vec::with_capacity(num_workers);
    for index in 0..num_workers {
        let work = Arc::clone(&work);
        let opts = ctx.fetch.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("imgbench-worker-{}", index))
            .spawn(move || loop {
                let next = match work.lock() {
                    Ok(mut q) => q.pop_front(),
                    Err(poisoned) => poisoned.into_inner().pop_front(),
                };
                let Some(url) = next else {
                    break;
                };
                fetcher::fetch(&url, &opts);
            });
        match spawned {
            Ok(h) => handles.push(h),
            Err(e) => tracing::warn!("could not spawn worker thread {}: {}", index, e),
        }
    }

    // Without any worker the queue would never drain; fall back to this thread.
    if handles.is_empty() {
        while let Some(url) = work.lock().ok().and_then(|mut q| q.pop_front()) {
            fetcher::fetch(&url, &ctx.fetch);
        }
    }

    for h in handles {
        if let Err(e) = h.join() {
            tracing::warn!("worker thread panicked: {:?}", e);
        }
    }
    start.elapsed()
}
