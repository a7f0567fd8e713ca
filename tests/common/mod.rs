// Common test utilities: tracing init and on-disk theme fixtures.

use std::fs;
use std::path::Path;
use std::sync::Once;

/// Initialize the global tracing subscriber once (used by tests that run
/// with `RUST_LOG`).
pub fn init_tracing_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stdout);
        let _ = subscriber.try_init();
    });
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Lay down a loadable theme package: the shared utility script, the
/// adapter script, and a minimal page inside the package.
pub fn write_theme(root: &Path, adapter: &str, theme: &str) {
    write(root, "themes/chatview/util.js", "function util() {}");
    write(
        root,
        &format!("themes/chatview/{adapter}/adapter.js"),
        &format!("function {adapter}Adapter() {{}}"),
    );
    write(
        root,
        &format!("themes/chatview/{adapter}/{theme}/main.html"),
        "<html></html>",
    );
}
