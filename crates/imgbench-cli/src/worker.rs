//! `imgbench-fetch`: the process-pool worker. Fetches exactly one URL.
//!
//! Arguments mirror `imgbench_core::runner::worker_args`; the exit code is
//! the only result the parent sees.

use clap::Parser;
use imgbench_core::fetcher::{self, FetchOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "imgbench-fetch")]
#[command(about = "Fetch one image into a directory (imgbench process-pool worker)", long_about = None)]
pub struct WorkerArgs {
    /// Directory that receives the image file.
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Pause after a successful write, in milliseconds.
    #[arg(long, default_value_t = 100, value_name = "MS")]
    pub delay_ms: u64,

    /// Do not follow HTTP redirects.
    #[arg(long)]
    pub no_follow_redirects: bool,

    /// Whole-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Image URL.
    pub url: String,
}

impl WorkerArgs {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            output_dir: self.output_dir.clone(),
            post_write_delay: Duration::from_millis(self.delay_ms),
            follow_redirects: !self.no_follow_redirects,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn run(&self) -> ExitCode {
        tracing::debug!(url = %self.url, pid = std::process::id(), "worker fetching");
        if fetcher::fetch(&self.url, &self.fetch_options()) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
