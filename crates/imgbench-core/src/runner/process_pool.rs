//! Process pool: each URL is fetched by a separate worker process.
//!
//! Nothing but values crosses the process boundary: the URL and the
//! immutable fetch options are passed as command-line arguments, and the
//! child reports success through its exit code. Each child builds its own
//! HTTP handle. The child's stdout is inherited so its error line reaches
//! the user directly.

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::fetcher::{self, FetchOptions};

use super::{effective_workers, RunContext};

/// File name of the worker binary shipped next to `imgbench`.
pub const WORKER_BIN_NAME: &str = "imgbench-fetch";

/// Program (plus fixed leading arguments) launched once per URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    pub program: PathBuf,
    pub base_args: Vec<OsString>,
}

impl WorkerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.base_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The worker binary in the same directory as the running executable.
    pub fn sibling_of_current_exe() -> Result<Self> {
        let exe = std::env::current_exe().context("locate current executable")?;
        let name = format!("{}{}", WORKER_BIN_NAME, std::env::consts::EXE_SUFFIX);
        Ok(Self::new(exe.with_file_name(name)))
    }

    fn command_for(&self, opts: &FetchOptions, url: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(worker_args(opts, url))
            .stdin(Stdio::null());
        cmd
    }
}

/// Argument list understood by the worker binary for one URL.
pub fn worker_args(opts: &FetchOptions, url: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--output-dir".into(),
        opts.output_dir.clone().into_os_string(),
        "--delay-ms".into(),
        opts.post_write_delay.as_millis().to_string().into(),
    ];
    if !opts.follow_redirects {
        args.push("--no-follow-redirects".into());
    }
    if let Some(timeout) = opts.timeout {
        args.push("--timeout-secs".into());
        args.push(timeout.as_secs().to_string().into());
    }
    // URLs may start with '-', so end option parsing first.
    args.push("--".into());
    args.push(url.into());
    args
}

/// Runs one worker process to completion. True when it exited successfully.
fn run_worker(worker: &WorkerCommand, opts: &FetchOptions, url: &str) -> bool {
    match worker.command_for(opts, url).status() {
        Ok(status) if status.success() => true,
        Ok(status) => {
            tracing::debug!(url, %status, "worker reported failure");
            false
        }
        Err(e) => {
            let err = anyhow::Error::new(e)
                .context(format!("launch worker {}", worker.program.display()));
            fetcher::report_failure(url, &format!("{:#}", err));
            false
        }
    }
}

/// Runs the fetcher over `urls` in child processes, at most
/// `ctx.process_workers` alive at once. Blocks until every child has exited.
pub fn run_process_pool(urls: &[String], ctx: &RunContext) -> Duration {
    let start = Instant::now();
    let num_slots = effective_workers(ctx.process_workers, urls.len());
    let work: Mutex<VecDeque<&str>> = Mutex::new(urls.iter().map(String::as_str).collect());

    std::thread::scope(|s| {
        for _ in 0..num_slots {
            let work = &work;
            let worker = &ctx.worker;
            let opts = &ctx.fetch;
            s.spawn(move || loop {
                let next = match work.lock() {
                    Ok(mut q) => q.pop_front(),
                    Err(poisoned) => poisoned.into_inner().pop_front(),
                };
                let Some(url) = next else {
                    break;
                };
                run_worker(worker, opts, url);
            });
        }
    });

    start.elapsed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn worker_args_defaults() {
        let opts = FetchOptions::new("/tmp/out");
        assert_eq!(
            strings(&worker_args(&opts, "http://x/a.jpg")),
            ["--output-dir", "/tmp/out", "--delay-ms", "100", "--", "http://x/a.jpg"]
        );
    }

    #[test]
    fn worker_args_optional_flags() {
        let mut opts = FetchOptions::new("out").with_delay(Duration::from_millis(0));
        opts.follow_redirects = false;
        opts.timeout = Some(Duration::from_secs(7));
        assert_eq!(
            strings(&worker_args(&opts, "http://x/b.jpg")),
            [
                "--output-dir",
                "out",
                "--delay-ms",
                "0",
                "--no-follow-redirects",
                "--timeout-secs",
                "7",
                "--",
                "http://x/b.jpg"
            ]
        );
    }

    #[test]
    fn sibling_worker_lives_next_to_exe() {
        let worker = WorkerCommand::sibling_of_current_exe().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(worker.program.parent(), exe.parent());
        assert!(worker
            .program
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(WORKER_BIN_NAME));
    }

    fn context(worker: WorkerCommand, dir: &std::path::Path) -> RunContext {
        RunContext {
            fetch: FetchOptions::new(dir),
            thread_workers: 2,
            process_workers: 2,
            blocking_threads: 2,
            worker,
        }
    }

    #[cfg(unix)]
    #[test]
    fn exit_codes_map_to_success() {
        let dir = tempfile::tempdir().unwrap();
        let ok = WorkerCommand::new("sh").with_args(["-c", "exit 0", "sh"]);
        let fail = WorkerCommand::new("sh").with_args(["-c", "exit 1", "sh"]);
        let opts = FetchOptions::new(dir.path());
        assert!(run_worker(&ok, &opts, "http://x/a.jpg"));
        assert!(!run_worker(&fail, &opts, "http://x/a.jpg"));
    }

    #[cfg(unix)]
    #[test]
    fn every_url_gets_its_own_process() {
        let dir = tempfile::tempdir().unwrap();
        // The URL is the last positional argument; touch a marker named after its last segment.
        let script = r#"for last; do :; done; touch "$2/${last##*/}""#;
        let worker = WorkerCommand::new("sh").with_args(["-c", script, "sh"]);
        let urls: Vec<String> = (0..5).map(|i| format!("http://x/{}.jpg", i)).collect();
        run_process_pool(&urls, &context(worker, dir.path()));
        for i in 0..5 {
            assert!(dir.path().join(format!("{}.jpg", i)).exists());
        }
    }

    #[test]
    fn missing_worker_binary_is_soft_failure() {
        let dir = tempfile::tempdir().unwrap();
        let worker = WorkerCommand::new(dir.path().join("no-such-worker"));
        let urls = vec!["http://x/a.jpg".to_string(), "http://x/b.jpg".to_string()];
        let elapsed = run_process_pool(&urls, &context(worker, dir.path()));
        assert!(elapsed < Duration::from_secs(30));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
