//! The unit of work: download one image and save it.
//!
//! One blocking GET per URL through a fresh libcurl easy handle. On HTTP 200
//! the body is written to `output_dir/<last URL segment>` (truncating), then
//! the caller-visible delay is applied. Every failure is reported on stdout
//! and swallowed; nothing propagates out of [`fetch`].

mod error;

pub use error::FetchError;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::BenchConfig;
use crate::url_model;

/// Immutable per-run options. Cloned into every unit of work, and encoded as
/// worker arguments for the process pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Directory that receives the image files.
    pub output_dir: PathBuf,
    /// Pause after a successful write.
    pub post_write_delay: Duration,
    pub follow_redirects: bool,
    /// Whole-request timeout; None waits forever.
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            post_write_delay: Duration::from_millis(100),
            follow_redirects: true,
            timeout: None,
        }
    }

    pub fn from_config(cfg: &BenchConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            post_write_delay: Duration::from_millis(cfg.post_write_delay_ms),
            follow_redirects: cfg.follow_redirects,
            timeout: cfg.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.post_write_delay = delay;
        self
    }
}

/// Status and full body of one GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// What a fetch did, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved { path: PathBuf, bytes: usize },
    /// Non-200 status; nothing written.
    Rejected { status: u32 },
}

/// Performs one blocking GET and buffers the whole body.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn http_get(url: &str, opts: &FetchOptions) -> Result<HttpResponse, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(opts.follow_redirects)?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(HttpResponse { status, body })
}

/// Writes `body` to the file derived from `url`, replacing any existing file.
pub fn save_body(output_dir: &Path, url: &str, body: &[u8]) -> Result<PathBuf, FetchError> {
    let path = url_model::output_path(output_dir, url);
    fs::write(&path, body).map_err(|source| FetchError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// GET plus save, without the delay and without reporting.
pub fn fetch_image(url: &str, opts: &FetchOptions) -> Result<FetchOutcome, FetchError> {
    let response = http_get(url, opts)?;
    if response.status != 200 {
        return Ok(FetchOutcome::Rejected {
            status: response.status,
        });
    }
    let path = save_body(&opts.output_dir, url, &response.body)?;
    Ok(FetchOutcome::Saved {
        path,
        bytes: response.body.len(),
    })
}

/// Downloads `url` and saves it. Returns true only when a file was written.
pub fn fetch(url: &str, opts: &FetchOptions) -> bool {
    match fetch_image(url, opts) {
        Ok(FetchOutcome::Saved { path, bytes }) => {
            tracing::debug!(url, bytes, path = %path.display(), "saved image");
            std::thread::sleep(opts.post_write_delay);
            true
        }
        Ok(FetchOutcome::Rejected { status }) => {
            tracing::debug!(url, status, "non-200 response, nothing written");
            false
        }
        Err(e) => {
            report_failure(url, &e);
            false
        }
    }
}

/// The stdout line for a failed download.
pub fn error_line(url: &str, err: &dyn fmt::Display) -> String {
    format!("Error downloading image from {}: {}", url, err)
}

/// Prints the failure line to stdout and logs it.
pub fn report_failure(url: &str, err: &dyn fmt::Display) {
    println!("{}", error_line(url, err));
    tracing::warn!(url, error = %err, "download failed");
}
