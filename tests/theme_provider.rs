//! End-to-end coverage of the current-theme manager: idempotent reloads,
//! fallback to the default theme, and failure behavior.

mod common;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chatview_themes::{
    ChatViewThemeProvider, MemoryOptions, OptionsStore, ScriptCache, SearchRoots, ThemeLoader,
    CHATVIEW_PROVIDER, DEFAULT_THEME_ID, OPTION_CHATVIEW_THEME,
};

fn provider_over(root: &Path, options: Arc<Mutex<dyn OptionsStore>>) -> ChatViewThemeProvider {
    common::init_tracing_from_env();
    let loader = ThemeLoader::new(
        SearchRoots::new(vec![root.to_path_buf()]),
        Arc::new(Mutex::new(ScriptCache::new())),
    );
    ChatViewThemeProvider::new(CHATVIEW_PROVIDER, OPTION_CHATVIEW_THEME, loader, options)
}

fn counting(provider: &mut ChatViewThemeProvider) -> Arc<AtomicUsize> {
    let changes = Arc::new(AtomicUsize::new(0));
    let observed = changes.clone();
    provider.on_theme_changed(move |_| {
        observed.fetch_add(1, Ordering::SeqCst);
    });
    changes
}

#[test]
fn load_current_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    common::write_theme(dir.path(), "alpha", "one");

    let options: Arc<Mutex<dyn OptionsStore>> = Arc::new(Mutex::new(MemoryOptions::new()));
    options.lock().unwrap().set(OPTION_CHATVIEW_THEME, "alpha/one");

    let mut provider = provider_over(dir.path(), options);
    let changes = counting(&mut provider);

    assert!(provider.load_current());
    assert_eq!(changes.load(Ordering::SeqCst), 1);
    let first = provider.current().unwrap();

    // Remove the whole tree: a second call must not touch the disk.
    std::fs::remove_dir_all(dir.path().join("themes")).unwrap();
    assert!(provider.load_current());
    assert_eq!(changes.load(Ordering::SeqCst), 1, "no second change signal");
    assert!(
        Arc::ptr_eq(&first, &provider.current().unwrap()),
        "theme instance must not be replaced"
    );
}

#[test]
fn fallback_self_heals_the_preference() {
    let dir = tempfile::tempdir().unwrap();
    common::write_theme(dir.path(), "classic", "default");

    let options: Arc<Mutex<dyn OptionsStore>> = Arc::new(Mutex::new(MemoryOptions::new()));
    options
        .lock()
        .unwrap()
        .set(OPTION_CHATVIEW_THEME, "missing/nowhere");

    let mut provider = provider_over(dir.path(), options.clone());
    let changes = counting(&mut provider);

    assert!(provider.load_current());
    assert_eq!(provider.current().unwrap().id(), DEFAULT_THEME_ID);
    assert_eq!(
        options.lock().unwrap().get(OPTION_CHATVIEW_THEME).as_deref(),
        Some(DEFAULT_THEME_ID),
        "preference must be rewritten to the default"
    );
    assert_eq!(changes.load(Ordering::SeqCst), 1);
}

#[test]
fn total_failure_keeps_the_previous_theme() {
    let dir = tempfile::tempdir().unwrap();
    common::write_theme(dir.path(), "alpha", "one");

    let options: Arc<Mutex<dyn OptionsStore>> = Arc::new(Mutex::new(MemoryOptions::new()));
    options.lock().unwrap().set(OPTION_CHATVIEW_THEME, "alpha/one");

    let mut provider = provider_over(dir.path(), options.clone());
    assert!(provider.load_current());
    let before = provider.current().unwrap();
    let changes = counting(&mut provider);

    // Neither the new preference nor the default exists on disk.
    options
        .lock()
        .unwrap()
        .set(OPTION_CHATVIEW_THEME, "missing/nowhere");
    assert!(!provider.load_current());
    assert!(
        Arc::ptr_eq(&before, &provider.current().unwrap()),
        "failed reload must leave the active theme untouched"
    );
    assert_eq!(changes.load(Ordering::SeqCst), 0);
}

#[test]
fn failing_default_preference_does_not_retry_itself() {
    let dir = tempfile::tempdir().unwrap();

    let options: Arc<Mutex<dyn OptionsStore>> = Arc::new(Mutex::new(MemoryOptions::new()));
    options
        .lock()
        .unwrap()
        .set(OPTION_CHATVIEW_THEME, DEFAULT_THEME_ID);

    let mut provider = provider_over(dir.path(), options);
    assert!(!provider.load_current());
    assert!(provider.current().is_none());
}

#[test]
fn set_current_theme_persists_and_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    common::write_theme(dir.path(), "alpha", "one");
    common::write_theme(dir.path(), "alpha", "two");

    let options: Arc<Mutex<dyn OptionsStore>> = Arc::new(Mutex::new(MemoryOptions::new()));
    options.lock().unwrap().set(OPTION_CHATVIEW_THEME, "alpha/one");

    let mut provider = provider_over(dir.path(), options.clone());
    assert!(provider.load_current());
    let changes = counting(&mut provider);

    provider.set_current_theme("alpha/two");
    assert_eq!(
        options.lock().unwrap().get(OPTION_CHATVIEW_THEME).as_deref(),
        Some("alpha/two")
    );
    assert_eq!(provider.current().unwrap().id(), "alpha/two");
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    // Setting the already-active id persists but does not reload.
    provider.set_current_theme("alpha/two");
    assert_eq!(changes.load(Ordering::SeqCst), 1);
}

#[test]
fn theme_ids_lists_packages_under_the_roots() {
    let dir = tempfile::tempdir().unwrap();
    common::write_theme(dir.path(), "alpha", "two");
    common::write(dir.path(), "themes/chatview/alpha/one.theme", "packed");

    let options: Arc<Mutex<dyn OptionsStore>> = Arc::new(Mutex::new(MemoryOptions::new()));
    let provider = provider_over(dir.path(), options);
    let ids = provider.theme_ids();
    assert!(ids.contains("alpha/one.theme"));
    assert!(ids.contains("alpha/two"));
}
