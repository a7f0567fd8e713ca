//! Theme loading: script caching, adapter resolution, and construction.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::cache::{ScriptCache, UTIL_SCRIPT_KEY};
use crate::error::ThemeError;
use crate::locator::THEMES_SUBDIR;
use crate::resolve::SearchRoots;
use crate::theme::ChatViewTheme;

/// Loads themes from disk, memoizing scripts in a shared [`ScriptCache`].
///
/// The shared utility script and each adapter script are read at most once
/// per cache lifetime; a load that fails partway still keeps whatever cache
/// entries it committed before failing.
pub struct ThemeLoader {
    roots: SearchRoots,
    cache: Arc<Mutex<ScriptCache>>,
}

impl ThemeLoader {
    pub fn new(roots: SearchRoots, cache: Arc<Mutex<ScriptCache>>) -> Self {
        Self { roots, cache }
    }

    pub fn roots(&self) -> &SearchRoots {
        &self.roots
    }

    /// Load and initialize the theme named by `theme_id`
    /// (`adapter/themeName`).
    ///
    /// The caller takes ownership of the returned theme; nothing about the
    /// previously active theme changes here.
    pub fn load(&self, theme_id: &str) -> Result<ChatViewTheme, ThemeError> {
        let util_script = self.ensure_util_script()?;

        let Some((adapter_name, _)) = theme_id.split_once('/') else {
            return Err(ThemeError::MalformedId(theme_id.to_owned()));
        };

        let package_rel = format!("{THEMES_SUBDIR}/{theme_id}");
        let package_path = self
            .roots
            .resolve(&package_rel)
            .ok_or(ThemeError::NotFound(package_rel))?;

        let (adapter_script, adapter_dir) = self.ensure_adapter_script(adapter_name)?;

        let mut theme = ChatViewTheme::new(theme_id);
        if !theme.initialize(package_path, vec![util_script, adapter_script], adapter_dir) {
            return Err(ThemeError::InitFailed(theme_id.to_owned()));
        }
        Ok(theme)
    }

    /// Return the shared utility script, reading and caching it on first use.
    /// No theme can load without it.
    fn ensure_util_script(&self) -> Result<String, ThemeError> {
        if let Some(script) = self.lock_cache().script(UTIL_SCRIPT_KEY) {
            return Ok(script.to_owned());
        }
        let (_, content) = self.read_script(&format!("{THEMES_SUBDIR}/util.js"))?;
        self.lock_cache()
            .insert_script(UTIL_SCRIPT_KEY, content.clone());
        Ok(content)
    }

    /// Return the adapter's script and directory, reading and caching both on
    /// the first load of any theme using this adapter.
    fn ensure_adapter_script(&self, adapter: &str) -> Result<(String, PathBuf), ThemeError> {
        {
            let cache = self.lock_cache();
            if let Some(script) = cache.script(adapter) {
                let dir = cache
                    .adapter_dir(adapter)
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                return Ok((script.to_owned(), dir));
            }
        }

        let rel = format!("{THEMES_SUBDIR}/{adapter}/adapter.js");
        let (path, content) = self.read_script(&rel)?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(adapter, path = %path.display(), "caching adapter script");

        let mut cache = self.lock_cache();
        cache.insert_script(adapter, content.clone());
        cache.record_adapter_dir(adapter, dir.clone());
        Ok((content, dir))
    }

    /// Resolve and read a script file, rejecting empty content.
    fn read_script(&self, relative: &str) -> Result<(PathBuf, String), ThemeError> {
        let path = self
            .roots
            .resolve(relative)
            .ok_or_else(|| ThemeError::NotFound(relative.to_owned()))?;
        let content = fs::read_to_string(&path).map_err(|source| ThemeError::Unreadable {
            path: path.clone(),
            source,
        })?;
        if content.is_empty() {
            return Err(ThemeError::EmptyScript(path));
        }
        Ok((path, content))
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, ScriptCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
