//! Fetch error type.

use std::path::PathBuf;

/// Error returned by one fetch: transport failure or a failed write.
///
/// Both are reported the same way to the user; the split only exists so
/// logs can tell a network problem from a disk problem.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, reset, timeout, malformed URL).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// Writing the body to disk failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}
