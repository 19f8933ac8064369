//! Single-threaded cooperative runner.
//!
//! All downloads are tasks on one current-thread tokio runtime. The blocking
//! GET is offloaded to the runtime's blocking pool and awaited through its
//! join handle, so the scheduler thread never waits on the network. The file
//! write happens synchronously inside the task; the post-write delay is an
//! await point.

use std::time::{Duration, Instant};
use tokio::task::JoinSet;

use crate::fetcher::{self, FetchOptions};

use super::RunContext;

/// Builds a current-thread runtime with `ctx.blocking_threads` helper threads
/// and runs every download on it to completion.
pub fn run_cooperative(urls: &[String], ctx: &RunContext) -> Duration {
    let start = Instant::now();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .max_blocking_threads(ctx.blocking_threads.max(1))
        .thread_name("imgbench-blocking")
        .build();
    match runtime {
        Ok(rt) => rt.block_on(run_cooperative_in(urls, ctx)),
        Err(e) => {
            tracing::error!("could not start cooperative runtime: {}", e);
            start.elapsed()
        }
    }
}

/// Same as [`run_cooperative`] for callers already inside a tokio runtime.
/// Uses that runtime's scheduler and blocking pool.
pub async fn run_cooperative_in(urls: &[String], ctx: &RunContext) -> Duration {
    let start = Instant::now();
    let mut tasks = JoinSet::new();
    for url in urls {
        tasks.spawn(fetch_cooperative(url.clone(), ctx.fetch.clone()));
    }
    while let Some(res) = tasks.join_next().await {
        if let Err(e) = res {
            tracing::warn!("download task failed: {}", e);
        }
    }
    start.elapsed()
}

async fn fetch_cooperative(url: String, opts: FetchOptions) -> bool {
    let joined = tokio::task::spawn_blocking({
        let url = url.clone();
        let opts = opts.clone();
        move || fetcher::http_get(&url, &opts)
    })
    .await;

    let response = match joined {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            fetcher::report_failure(&url, &e);
            return false;
        }
        Err(e) => {
            fetcher::report_failure(&url, &e);
            return false;
        }
    };

    if response.status != 200 {
        tracing::debug!(url = %url, status = response.status, "non-200 response, nothing written");
        return false;
    }

    match fetcher::save_body(&opts.output_dir, &url, &response.body) {
        Ok(path) => {
            tracing::debug!(url = %url, bytes = response.body.len(), path = %path.display(), "saved image");
        }
        Err(e) => {
            fetcher::report_failure(&url, &e);
            return false;
        }
    }

    tokio::time::sleep(opts.post_write_delay).await;
    true
}
