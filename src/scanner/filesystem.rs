//! File system scanning utilities

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Walk `root` and return every regular file, relative to `root`
pub fn scan_directory(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .ignore(true)
        .parents(true)
        .build();

    for entry in walker.flatten() {
        let path = entry.path();

        // Skip .git directory
        if path.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        if let Ok(relative) = path.strip_prefix(root) {
            if !relative.as_os_str().is_empty() {
                files.push(relative.to_path_buf());
            }
        }
    }

    files
}
