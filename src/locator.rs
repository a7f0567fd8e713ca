//! Theme discovery across search roots.

use std::collections::BTreeSet;
use std::fs;

use crate::resolve::SearchRoots;

/// Subtree under each search root that holds chat view theme packages.
pub const THEMES_SUBDIR: &str = "themes/chatview";

/// Enumerate every `adapter/themeName` identifier visible under the roots.
///
/// Each immediate subdirectory of `themes/chatview/` names an adapter; inside
/// it, immediate subdirectories and `*.theme` files name themes. Missing or
/// unreadable roots contribute nothing. The result is deduplicated across
/// roots; which root wins for a duplicated identifier only matters when
/// loading, not here.
pub fn theme_ids(roots: &SearchRoots) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    for root in roots.roots() {
        let Ok(adapters) = fs::read_dir(root.join(THEMES_SUBDIR)) else {
            continue;
        };
        for adapter in adapters.flatten() {
            let adapter_path = adapter.path();
            if !adapter_path.is_dir() {
                continue;
            }
            let Some(adapter_name) = adapter_path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_owned)
            else {
                continue;
            };
            let Ok(entries) = fs::read_dir(&adapter_path) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                let is_theme_file =
                    path.is_file() && path.extension().is_some_and(|ext| ext == "theme");
                if !path.is_dir() && !is_theme_file {
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    ids.insert(format!("{adapter_name}/{name}"));
                }
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn lists_theme_dirs_and_theme_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path().join("themes/chatview/alpha/one.theme"));
        fs::create_dir_all(dir.path().join("themes/chatview/alpha/two")).unwrap();
        // Stray non-theme file must not show up.
        touch(dir.path().join("themes/chatview/alpha/readme.txt"));

        let roots = SearchRoots::new(vec![dir.path().to_path_buf()]);
        let ids = theme_ids(&roots);
        assert_eq!(
            ids,
            BTreeSet::from(["alpha/one.theme".to_owned(), "alpha/two".to_owned()])
        );
    }

    #[test]
    fn deduplicates_across_roots_and_skips_missing() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::create_dir_all(first.path().join("themes/chatview/classic/default")).unwrap();
        fs::create_dir_all(second.path().join("themes/chatview/classic/default")).unwrap();
        fs::create_dir_all(second.path().join("themes/chatview/classic/extra")).unwrap();

        let roots = SearchRoots::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
            PathBuf::from("/nonexistent/root"),
        ]);
        let ids = theme_ids(&roots);
        assert_eq!(
            ids,
            BTreeSet::from(["classic/default".to_owned(), "classic/extra".to_owned()])
        );
    }
}
