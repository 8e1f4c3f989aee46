//! Filesystem path helpers.

use std::path::{Path, PathBuf};

/// Pick a directory path under `parent` that does not exist yet.
///
/// Returns `parent/name` when free, otherwise `parent/name-2`, `parent/name-3`
/// and so on. The namespace is consulted, not locked; the pipeline is the only
/// writer.
pub fn unique_dir(parent: &Path, name: &str) -> PathBuf {
    let first = parent.join(name);
    if !first.exists() {
        return first;
    }

    let mut n = 2u32;
    loop {
        let candidate = parent.join(format!("{name}-{n}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
