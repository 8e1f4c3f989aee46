//! Archive directory layout and writing.
//!
//! One directory per post, named from the publish timestamp. An existing
//! directory with the same name gets a numeric suffix instead of being
//! overwritten, so re-runs into a non-empty output root never clobber a
//! previous snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ArchiveError;
use crate::localize::LocalizedPage;
use crate::post::Post;
use crate::utils::fs::unique_dir;

/// Write one post's snapshot: asset files first, `index.html` last.
///
/// Returns the directory the entry was written to. Any filesystem error is
/// fatal for this post only.
pub fn write_entry(
    out_root: &Path,
    post: &Post,
    page: &LocalizedPage,
) -> Result<PathBuf, ArchiveError> {
    fs::create_dir_all(out_root).map_err(|err| ArchiveError::Write(out_root.to_path_buf(), err))?;

    let dir = unique_dir(out_root, &post.folder_name());
    fs::create_dir(&dir).map_err(|err| ArchiveError::Write(dir.clone(), err))?;

    for asset in &page.assets {
        let path = dir.join(&asset.rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| ArchiveError::Write(parent.to_path_buf(), err))?;
        }
        fs::write(&path, &asset.bytes).map_err(|err| ArchiveError::Write(path.clone(), err))?;
    }

    let index = dir.join("index.html");
    fs::write(&index, &page.html).map_err(|err| ArchiveError::Write(index.clone(), err))?;

    Ok(dir)
}
