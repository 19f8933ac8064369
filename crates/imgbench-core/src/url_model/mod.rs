//! Output filename derivation.
//!
//! The filename is the raw text after the last `/` of the URL: no query
//! stripping, no percent-decoding, no sanitization. Two URLs with the same
//! trailing segment map to the same file.

use std::path::{Path, PathBuf};

/// Returns the trailing `/`-separated segment of `url`.
///
/// # Examples
///
/// - `output_filename("http://x/img/a.jpg")` → `"a.jpg"`
/// - `output_filename("http://x/a.jpg?size=2")` → `"a.jpg?size=2"`
/// - `output_filename("http://x/")` → `""`
pub fn output_filename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Joins the derived filename onto `output_dir`.
pub fn output_path(output_dir: &Path, url: &str) -> PathBuf {
    output_dir.join(output_filename(url))
}
