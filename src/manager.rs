//! Registry of theme providers, keyed by view surface name.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::provider::ChatViewThemeProvider;
use crate::theme::ChatViewTheme;

/// Provider name for the one-to-one chat view.
pub const CHATVIEW_PROVIDER: &str = "chatview";

/// Provider name for the group chat view.
pub const GROUPCHATVIEW_PROVIDER: &str = "groupchatview";

/// Process-level lookup from provider name to provider.
///
/// The resource URL handler resolves "which theme issued this request"
/// through this registry; the picker UI reaches providers the same way.
#[derive(Default)]
pub struct ThemeManager {
    providers: Mutex<HashMap<String, Arc<Mutex<ChatViewThemeProvider>>>>,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own name, returning the shared handle.
    pub fn register_provider(
        &self,
        provider: ChatViewThemeProvider,
    ) -> Arc<Mutex<ChatViewThemeProvider>> {
        let name = provider.name().to_owned();
        let handle = Arc::new(Mutex::new(provider));
        self.lock_providers().insert(name, handle.clone());
        handle
    }

    pub fn provider(&self, name: &str) -> Option<Arc<Mutex<ChatViewThemeProvider>>> {
        self.lock_providers().get(name).cloned()
    }

    /// Active theme of the named provider, if any.
    pub fn current_theme(&self, name: &str) -> Option<Arc<ChatViewTheme>> {
        self.provider(name)
            .and_then(|p| p.lock().unwrap_or_else(PoisonError::into_inner).current())
    }

    fn lock_providers(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Mutex<ChatViewThemeProvider>>>> {
        self.providers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
