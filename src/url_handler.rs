//! Custom URL scheme plumbing between the embedded renderer and loaded
//! themes.
//!
//! Theme pages request sub-resources through
//! `theme:///<adapter>/<theme>/<resource>` URLs. The renderer hands those to
//! the [`SchemeHandler`] registered for the `theme` scheme, which maps them
//! back to the active theme's package.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::manager::{ThemeManager, CHATVIEW_PROVIDER, GROUPCHATVIEW_PROVIDER};
use crate::theme::ChatViewTheme;

/// Handler for one custom URL scheme served to the embedded renderer.
///
/// An empty reply means the resource could not be produced.
pub trait SchemeHandler: Send + Sync {
    fn data(&self, url: &Url) -> Vec<u8>;
}

/// Scheme name to handler table consulted by the renderer glue.
///
/// Registration is first-write-wins, so repeated provider setup cannot
/// replace an installed handler.
#[derive(Default)]
pub struct SchemeRegistry {
    handlers: HashMap<String, Arc<dyn SchemeHandler>>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler` for `scheme`. Returns false when the scheme was
    /// already registered; the existing handler stays in that case.
    pub fn register(&mut self, scheme: &str, handler: Arc<dyn SchemeHandler>) -> bool {
        if self.handlers.contains_key(scheme) {
            return false;
        }
        self.handlers.insert(scheme.to_owned(), handler);
        true
    }

    pub fn handler(&self, scheme: &str) -> Option<Arc<dyn SchemeHandler>> {
        self.handlers.get(scheme).cloned()
    }
}

/// One-time registration of the `avatar` and `theme` schemes during
/// application startup. Calling it again changes nothing; the return value
/// says whether this call performed the registration.
pub fn install_theme_schemes(
    registry: &mut SchemeRegistry,
    manager: Arc<ThemeManager>,
    avatar_handler: Arc<dyn SchemeHandler>,
) -> bool {
    let avatar_installed = registry.register("avatar", avatar_handler);
    let theme_installed = registry.register("theme", Arc::new(ThemeUrlHandler::new(manager)));
    avatar_installed && theme_installed
}

/// Serves `theme://` requests issued by pages of a loaded theme.
pub struct ThemeUrlHandler {
    manager: Arc<ThemeManager>,
}

impl ThemeUrlHandler {
    pub fn new(manager: Arc<ThemeManager>) -> Self {
        Self { manager }
    }

    /// The theme that plausibly issued a request carrying `theme_id`.
    ///
    /// Nothing in the request says which view issued it, so the identifier
    /// is matched against the chat view's active theme and then the group
    /// chat view's. During a rapid theme switch a request still carrying the
    /// old identifier matches neither and gets an empty reply.
    fn matching_theme(&self, theme_id: &str) -> Option<Arc<ChatViewTheme>> {
        [CHATVIEW_PROVIDER, GROUPCHATVIEW_PROVIDER]
            .iter()
            .find_map(|name| {
                self.manager
                    .current_theme(name)
                    .filter(|theme| theme.id() == theme_id)
            })
    }
}

impl SchemeHandler for ThemeUrlHandler {
    fn data(&self, url: &Url) -> Vec<u8> {
        debug!(url = %url, "loading theme file");
        // Path is "/<adapter>/<theme>/<resource...>".
        let path = url.path();
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 3 {
            return Vec::new();
        }
        let theme_id = format!("{}/{}", segments[1], segments[2]);
        let Some(theme) = self.matching_theme(&theme_id) else {
            debug!(theme = %theme_id, url = %url,
                   "theme with this id is not loaded; rejecting resource request");
            return Vec::new();
        };
        // Strip the identifier and its two delimiting slashes.
        let resource = path.get(theme_id.len() + 2..).unwrap_or("");
        match theme.read_resource(resource) {
            Some(bytes) => bytes,
            None => {
                debug!(url = %url, "content is not found in the theme");
                Vec::new()
            }
        }
    }
}
