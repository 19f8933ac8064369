use std::time::{Duration, Instant};

use crate::fetcher;

use super::RunContext;

/// Fetches each URL in order on the calling thread.
pub fn run_sequential(urls: &[String], ctx: &RunContext) -> Duration {
    let start = Instant::now();
    for url in urls {
        fetcher::fetch(url, &ctx.fetch);
    }
    start.elapsed()
}
