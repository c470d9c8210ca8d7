//! Contents of the source directory.

use std::io;
use std::path::Path;

/// Names of the entries in `source_dir`, sorted.
///
/// In-flight `.part` downloads and extraction staging directories are
/// skipped. A missing directory lists as empty.
pub fn list_installed(source_dir: &Path) -> io::Result<Vec<String>> {
    let entries = match std::fs::read_dir(source_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut names = Vec::new();
    for entry in entries {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.ends_with(".part") || name.starts_with('.') {
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}
