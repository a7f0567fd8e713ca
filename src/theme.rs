//! The theme object: a loaded package plus the scripts that drive it.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Optional metadata read from `manifest.json` inside a theme package.
///
/// All fields default; a package without a manifest is valid, a package with
/// an unparseable one is not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeManifest {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// A chat view theme bound to its on-disk package.
///
/// Constructed empty by the loader, then bound with [`initialize`]; an
/// instance whose `initialize` returned false is discarded, so everything
/// downstream only ever sees bound themes.
///
/// [`initialize`]: ChatViewTheme::initialize
#[derive(Debug)]
pub struct ChatViewTheme {
    id: String,
    package_path: PathBuf,
    adapter_dir: PathBuf,
    scripts: Vec<String>,
    manifest: ThemeManifest,
    case_insensitive_fs: bool,
}

impl ChatViewTheme {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            package_path: PathBuf::new(),
            adapter_dir: PathBuf::new(),
            scripts: Vec::new(),
            manifest: ThemeManifest::default(),
            case_insensitive_fs: false,
        }
    }

    /// Bind the theme to its package and scripts.
    ///
    /// `scripts` is ordered: the shared utility script first, then the
    /// adapter script. Returns false when the package path does not exist,
    /// no script has content, or a present `manifest.json` fails to parse.
    pub fn initialize(
        &mut self,
        package_path: PathBuf,
        scripts: Vec<String>,
        adapter_dir: PathBuf,
    ) -> bool {
        if !package_path.exists() {
            warn!(theme = %self.id, path = %package_path.display(), "theme package is missing");
            return false;
        }
        if scripts.iter().all(String::is_empty) {
            warn!(theme = %self.id, "theme has no scripts to run");
            return false;
        }
        if package_path.is_dir() {
            match read_manifest(&package_path) {
                Ok(manifest) => self.manifest = manifest,
                Err(e) => {
                    warn!(theme = %self.id, error = %e, "invalid theme manifest");
                    return false;
                }
            }
        }
        // Directory packages inherit the host filesystem's case semantics;
        // archive packages keep their internal, case-sensitive naming.
        self.case_insensitive_fs =
            package_path.is_dir() && cfg!(any(windows, target_os = "macos"));
        self.package_path = package_path;
        self.scripts = scripts;
        self.adapter_dir = adapter_dir;
        true
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    /// Directory the adapter script was loaded from, used to resolve
    /// adapter-relative assets.
    pub fn adapter_dir(&self) -> &Path {
        &self.adapter_dir
    }

    /// Scripts in injection order: shared utility first, then the adapter.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn manifest(&self) -> &ThemeManifest {
        &self.manifest
    }

    pub fn case_insensitive_fs(&self) -> bool {
        self.case_insensitive_fs
    }

    #[cfg(test)]
    pub(crate) fn force_case_insensitive(&mut self, value: bool) {
        self.case_insensitive_fs = value;
    }

    /// Raw bytes of a resource inside the package, or `None` if absent.
    ///
    /// Traversal (`..`) and absolute components are rejected. When the
    /// package came from a case-insensitive origin, a miss on the exact path
    /// falls back to a case-insensitive component walk.
    pub fn read_resource(&self, relative: &str) -> Option<Vec<u8>> {
        if self.package_path.is_file() {
            // Archive (.theme) packages are located and listed but their
            // contents are not unpacked.
            debug!(theme = %self.id, resource = relative,
                   "archive package resources are not served");
            return None;
        }
        let rel = sanitize(relative)?;
        let exact = self.package_path.join(&rel);
        if let Ok(bytes) = fs::read(&exact) {
            return Some(bytes);
        }
        if self.case_insensitive_fs {
            if let Some(found) = case_insensitive_lookup(&self.package_path, &rel) {
                return fs::read(found).ok();
            }
        }
        debug!(theme = %self.id, resource = relative, "resource not found in theme package");
        None
    }
}

/// Normalize a resource path, rejecting anything that could escape the
/// package directory.
fn sanitize(relative: &str) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for comp in Path::new(relative).components() {
        match comp {
            Component::Normal(c) => out.push(c),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Walk `base` matching each component of `rel` without regard to case.
fn case_insensitive_lookup(base: &Path, rel: &Path) -> Option<PathBuf> {
    let mut current = base.to_path_buf();
    for comp in rel.components() {
        let want = comp.as_os_str().to_str()?.to_lowercase();
        let mut matched = None;
        for entry in fs::read_dir(&current).ok()?.flatten() {
            let name = entry.file_name();
            if name.to_str().is_some_and(|n| n.to_lowercase() == want) {
                matched = Some(entry.path());
                break;
            }
        }
        current = matched?;
    }
    Some(current)
}

fn read_manifest(package: &Path) -> anyhow::Result<ThemeManifest> {
    let path = package.join("manifest.json");
    if !path.exists() {
        return Ok(ThemeManifest::default());
    }
    let text = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&text)?)
}
