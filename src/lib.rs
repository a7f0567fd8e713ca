//! Chat view theme engine for a desktop messaging client.
//!
//! Resolves theme packages (`adapter/themeName`) across an ordered list of
//! search roots, loads and caches the shared utility script and per-adapter
//! scripts, tracks the active theme per view surface with fallback to a
//! default theme, and serves in-theme resources to the embedded web renderer
//! through the `theme://` URL scheme.
//!
//! Typical wiring at application startup:
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use chatview_themes::{
//!     install_theme_schemes, ChatViewThemeProvider, JsonFileOptions, SchemeRegistry,
//!     ScriptCache, SearchRoots, ThemeLoader, ThemeManager, CHATVIEW_PROVIDER,
//!     OPTION_CHATVIEW_THEME,
//! };
//! # use chatview_themes::SchemeHandler;
//! # struct AvatarHandler;
//! # impl SchemeHandler for AvatarHandler {
//! #     fn data(&self, _url: &url::Url) -> Vec<u8> { Vec::new() }
//! # }
//!
//! # fn main() -> anyhow::Result<()> {
//! let cache = Arc::new(Mutex::new(ScriptCache::new()));
//! let options = Arc::new(Mutex::new(JsonFileOptions::open("options.json")?));
//! let manager = Arc::new(ThemeManager::new());
//!
//! let provider = ChatViewThemeProvider::new(
//!     CHATVIEW_PROVIDER,
//!     OPTION_CHATVIEW_THEME,
//!     ThemeLoader::new(SearchRoots::standard(), cache.clone()),
//!     options.clone(),
//! );
//! let provider = manager.register_provider(provider);
//! provider.lock().unwrap().load_current();
//!
//! let mut schemes = SchemeRegistry::new();
//! install_theme_schemes(&mut schemes, manager, Arc::new(AvatarHandler));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod locator;
pub mod manager;
pub mod options;
pub mod provider;
pub mod resolve;
pub mod theme;
pub mod url_handler;

pub use cache::{ScriptCache, UTIL_SCRIPT_KEY};
pub use error::ThemeError;
pub use loader::ThemeLoader;
pub use locator::{theme_ids, THEMES_SUBDIR};
pub use manager::{ThemeManager, CHATVIEW_PROVIDER, GROUPCHATVIEW_PROVIDER};
pub use options::{
    JsonFileOptions, MemoryOptions, OptionsStore, OPTION_CHATVIEW_THEME,
    OPTION_GROUPCHATVIEW_THEME,
};
pub use provider::{ChatViewThemeProvider, DEFAULT_THEME_ID};
pub use resolve::SearchRoots;
pub use theme::{ChatViewTheme, ThemeManifest};
pub use url_handler::{install_theme_schemes, SchemeHandler, SchemeRegistry, ThemeUrlHandler};
