//! Script cache shared by every theme provider in the process.
//!
//! Adapter scripts and the shared utility script are loaded from disk at most
//! once per cache lifetime; the cache also remembers which directory each
//! adapter was loaded from, which is needed later to resolve adapter-relative
//! assets. The cache is an explicit object rather than a process global so
//! tests can run against isolated instances; providers share one behind an
//! `Arc<Mutex<..>>`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reserved cache key for the shared utility script prepended to every
/// adapter's script list.
pub const UTIL_SCRIPT_KEY: &str = "util";

/// Memoized script sources and adapter directories.
#[derive(Debug, Default)]
pub struct ScriptCache {
    scripts: HashMap<String, String>,
    adapter_dirs: HashMap<String, PathBuf>,
}

impl ScriptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached script for `name`.
    ///
    /// An empty cached value counts as a miss: a load that produced no
    /// content gets retried on the next request instead of being served.
    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts
            .get(name)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Store a script under `name`. Empty content is dropped so a bad load
    /// never shadows a later successful one.
    pub fn insert_script(&mut self, name: &str, content: String) {
        if !content.is_empty() {
            self.scripts.insert(name.to_owned(), content);
        }
    }

    /// Directory the named adapter's script was loaded from.
    pub fn adapter_dir(&self, adapter: &str) -> Option<&Path> {
        self.adapter_dirs.get(adapter).map(PathBuf::as_path)
    }

    pub fn record_adapter_dir(&mut self, adapter: &str, dir: PathBuf) {
        self.adapter_dirs.insert(adapter.to_owned(), dir);
    }
}
