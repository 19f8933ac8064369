//! CLI for the imgbench strategy benchmark.

use anyhow::{Context, Result};
use clap::Parser;
use imgbench_core::config;
use imgbench_core::fetcher::FetchOptions;
use imgbench_core::harness;
use imgbench_core::runner::{RunContext, WorkerCommand};

/// Download images from URLs with four execution strategies and time each one.
#[derive(Debug, Parser)]
#[command(name = "imgbench")]
#[command(about = "Download images from URLs and time four execution strategies", long_about = None)]
pub struct Cli {
    /// List of image URLs.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let output_dir = std::env::current_dir().context("resolve current directory")?;
        let worker = WorkerCommand::sibling_of_current_exe()?;
        if !worker.program.exists() {
            tracing::warn!(
                "worker binary {} not found; process-pool downloads will fail",
                worker.program.display()
            );
        }
        let ctx = RunContext::from_config(&cfg, FetchOptions::from_config(&cfg, output_dir), worker);
        tracing::info!(
            urls = self.urls.len(),
            thread_workers = ctx.thread_workers,
            process_workers = ctx.process_workers,
            blocking_threads = ctx.blocking_threads,
            "starting benchmark"
        );

        harness::run_all(&self.urls, &ctx);
        Ok(())
    }
}

pub fn run_from_args() -> Result<()> {
    Cli::parse().run()
}
