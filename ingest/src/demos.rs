use std::path::{Path, PathBuf};

/// Recursively collects the files below `root` whose extension matches, in
/// path order. Only a failure to read `root` itself is an error, entries below
/// it that cannot be read are logged and skipped.
pub fn find_demos(root: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');

    let mut found = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!(path = ?e.path(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if path.extension().is_some_and(|e| e == extension) {
            found.push(path);
        }
    }

    Ok(found)
}
