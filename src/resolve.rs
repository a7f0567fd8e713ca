//! Ordered search roots for theme files.

use std::path::{Path, PathBuf};

/// Ordered list of directories probed for theme resources.
///
/// `resolve` returns the first root under which a relative path exists, so
/// earlier roots shadow later ones. Listing themes walks every root; only
/// loading cares about precedence.
#[derive(Debug, Clone)]
pub struct SearchRoots {
    roots: Vec<PathBuf>,
}

impl SearchRoots {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Standard application roots in priority order: the working directory,
    /// the user data directory, and the installed resources directory.
    pub fn standard() -> Self {
        let mut roots = vec![PathBuf::from(".")];
        if let Some(data) = dirs::data_dir() {
            roots.push(data.join("chatview"));
        }
        roots.push(installed_resources_dir());
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// First root under which `relative` exists, joined with it.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.exists())
    }
}

fn installed_resources_dir() -> PathBuf {
    if cfg!(windows) {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        PathBuf::from("/usr/share/chatview")
    }
}
