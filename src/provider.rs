//! The current-theme manager for one chat view surface.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::loader::ThemeLoader;
use crate::locator;
use crate::options::OptionsStore;
use crate::theme::ChatViewTheme;

/// Identifier loaded when the configured theme cannot be.
pub const DEFAULT_THEME_ID: &str = "classic/default";

type ChangeCallback = Box<dyn Fn(&str) + Send>;
type SharedOptions = Arc<Mutex<dyn OptionsStore>>;

/// Owns the active theme for one view surface and reconciles it with the
/// persisted preference.
///
/// Two providers normally exist, `"chatview"` and `"groupchatview"`, sharing
/// one script cache and one options store but each owning its own active
/// theme.
pub struct ChatViewThemeProvider {
    name: String,
    option_key: String,
    loader: ThemeLoader,
    options: SharedOptions,
    current: Option<Arc<ChatViewTheme>>,
    changed: Vec<ChangeCallback>,
}

impl ChatViewThemeProvider {
    pub fn new(
        name: impl Into<String>,
        option_key: impl Into<String>,
        loader: ThemeLoader,
        options: SharedOptions,
    ) -> Self {
        Self {
            name: name.into(),
            option_key: option_key.into(),
            loader,
            options,
            current: None,
            changed: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The active theme, if one has been loaded.
    pub fn current(&self) -> Option<Arc<ChatViewTheme>> {
        self.current.clone()
    }

    /// Observe successful theme switches; callbacks receive the new
    /// identifier.
    pub fn on_theme_changed(&mut self, callback: impl Fn(&str) + Send + 'static) {
        self.changed.push(Box::new(callback));
    }

    /// Identifiers of every theme visible under this provider's search
    /// roots.
    pub fn theme_ids(&self) -> BTreeSet<String> {
        locator::theme_ids(self.loader.roots())
    }

    /// Load the preferred theme from the options store.
    ///
    /// A no-op when the active theme already matches the preference. On a
    /// failed load the provider falls back to [`DEFAULT_THEME_ID`] (unless
    /// that was already the preference) and, when the fallback succeeds,
    /// rewrites the persisted preference to it. The previous theme is only
    /// replaced after a successful load, and the change signal fires only
    /// when the active identifier actually changed. Returns false when no
    /// theme could be loaded; the previously active theme stays in place.
    pub fn load_current(&mut self) -> bool {
        let loaded_id = self
            .current
            .as_ref()
            .map(|t| t.id().to_owned())
            .unwrap_or_default();
        let preferred = self
            .lock_options()
            .get(&self.option_key)
            .unwrap_or_default();
        if !loaded_id.is_empty() && loaded_id == preferred {
            return true; // already active, nothing to do
        }

        let theme = match self.loader.load(&preferred) {
            Ok(theme) => Some(theme),
            Err(e) => {
                debug!(provider = %self.name, theme = %preferred, error = %e,
                       "configured theme failed to load");
                if preferred != DEFAULT_THEME_ID {
                    warn!(provider = %self.name, "falling back to the default theme");
                    match self.loader.load(DEFAULT_THEME_ID) {
                        Ok(theme) => {
                            self.lock_options().set(&self.option_key, DEFAULT_THEME_ID);
                            Some(theme)
                        }
                        Err(e) => {
                            debug!(provider = %self.name, error = %e,
                                   "default theme failed to load");
                            None
                        }
                    }
                } else {
                    None
                }
            }
        };

        let Some(theme) = theme else {
            return false;
        };
        let new_id = theme.id().to_owned();
        // The old instance is dropped here, after the replacement is known
        // good.
        self.current = Some(Arc::new(theme));
        if new_id != loaded_id {
            debug!(provider = %self.name, theme = %new_id, "theme changed");
            for callback in &self.changed {
                callback(&new_id);
            }
        }
        true
    }

    /// Persist `id` as the preferred theme, then reconcile immediately when
    /// it differs from the active one. The reconcile re-reads the option
    /// just written.
    pub fn set_current_theme(&mut self, id: &str) {
        self.lock_options().set(&self.option_key, id);
        if self.current.as_ref().is_none_or(|t| t.id() != id) {
            self.load_current();
        }
    }

    fn lock_options(&self) -> std::sync::MutexGuard<'_, dyn OptionsStore + 'static> {
        self.options.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
