//! Output tree layout and the best-effort filesystem operations around it.
//!
//! Folder creation and file deletion never abort a run: failures are logged
//! with the offending path and the caller carries on.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use crate::{AssetCollection, Options};

/// Default output root, relative to the working directory.
pub const DEFAULT_ASSET_ROOT: &str = "assets";

/// `<asset_root>/<parent folder>/<collection folder>`
///
/// Both configured segments are appended below `asset_root` even when they
/// are written as absolute paths; root, prefix and `..` components are dropped.
pub fn collection_folder(
    asset_root: &Path,
    options: &Options,
    collection: &AssetCollection,
) -> PathBuf {
    let mut folder = asset_root.to_path_buf();
    for segment in [&options.parent_folder, &collection.folder] {
        folder.extend(
            Path::new(segment)
                .components()
                .filter(|component| matches!(component, Component::Normal(_))),
        );
    }
    folder
}

/// Creates `path` and any missing ancestors. Returns `false` if creation
/// failed; the failure has already been logged.
pub fn ensure_folder(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }

    match fs::create_dir_all(path) {
        Ok(()) => {
            tracing::debug!(folder = %path.display(), "created folder");
            true
        }
        Err(err) => {
            tracing::error!(folder = %path.display(), error = %err, details = ?err, "error creating folder");
            false
        }
    }
}

/// Removes `folder/file`. Returns `false` if removal failed; the failure has
/// already been logged.
pub fn delete_file(folder: &Path, file: &str) -> bool {
    let path = folder.join(file);
    match fs::remove_file(&path) {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, details = ?err, "error deleting file");
            false
        }
    }
}
