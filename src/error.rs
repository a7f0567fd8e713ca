//! Failure kinds produced while resolving and loading themes.

use std::path::PathBuf;

use thiserror::Error;

/// Why a theme could not be loaded.
///
/// Callers that only care about success treat every variant the same; the
/// variants exist so logs say which stage gave up.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The identifier is not of the `adapter/themeName` form.
    #[error("malformed theme id {0:?}: expected adapter/themeName")]
    MalformedId(String),

    /// A required file or package was not found under any search root.
    #[error("{0} not found under any search root")]
    NotFound(String),

    /// The file exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script file read successfully but contained nothing.
    #[error("script {} is empty", .0.display())]
    EmptyScript(PathBuf),

    /// The theme object rejected its package path or scripts.
    #[error("theme {0} failed to initialize")]
    InitFailed(String),
}
