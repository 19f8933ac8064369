use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound for the default thread and blocking-pool sizes.
const MAX_DEFAULT_WORKERS: usize = 32;

/// Global configuration loaded from `~/.config/imgbench/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Pause after each successful write, in milliseconds.
    #[serde(default = "default_post_write_delay_ms")]
    pub post_write_delay_ms: u64,
    /// Worker threads for the thread-pool runner (None = min(32, cpus + 4)).
    #[serde(default)]
    pub thread_workers: Option<usize>,
    /// Concurrent worker processes for the process-pool runner (None = cpu count).
    #[serde(default)]
    pub process_workers: Option<usize>,
    /// Blocking threads backing the cooperative runner (None = min(32, cpus + 4)).
    #[serde(default)]
    pub blocking_threads: Option<usize>,
    /// Follow HTTP redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    /// Whole-request timeout in seconds. None means a hung request stalls its runner.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_post_write_delay_ms() -> u64 {
    100
}

fn default_follow_redirects() -> bool {
    true
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            post_write_delay_ms: default_post_write_delay_ms(),
            thread_workers: None,
            process_workers: None,
            blocking_threads: None,
            follow_redirects: default_follow_redirects(),
            timeout_secs: None,
        }
    }
}

impl BenchConfig {
    pub fn thread_workers(&self) -> usize {
        self.thread_workers
            .unwrap_or_else(|| (cpu_count() + 4).min(MAX_DEFAULT_WORKERS))
            .max(1)
    }

    pub fn process_workers(&self) -> usize {
        self.process_workers.unwrap_or_else(cpu_count).max(1)
    }

    pub fn blocking_threads(&self) -> usize {
        self.blocking_threads
            .unwrap_or_else(|| (cpu_count() + 4).min(MAX_DEFAULT_WORKERS))
            .max(1)
    }
}

fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgbench")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BenchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BenchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<BenchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: BenchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
