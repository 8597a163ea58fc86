use std::fs::Metadata;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use futures::future::try_join_all;
use tokio::fs;
use walkdir::WalkDir;

use super::error::{Result, TestDirectoryError};
use super::symlink;

/// Copies the modification and access times of `metadata` onto `dst`.
pub(crate) fn preserve_times(metadata: &Metadata, dst: &Path) -> Result<()> {
    filetime::set_file_times(
        dst,
        FileTime::from_last_access_time(metadata),
        FileTime::from_last_modification_time(metadata),
    )?;
    Ok(())
}

async fn copy_file(src_path: PathBuf, dst_path: PathBuf) -> Result<()> {
    fs::copy(&src_path, &dst_path).await?;
    let metadata = fs::metadata(&src_path).await?;
    preserve_times(&metadata, &dst_path)
}

/// Copies the tree at `src_path` into the new directory `dst_path`.
///
/// Symlinks inside the tree are recreated with the same target, never
/// followed. The source is walked before `dst_path` is created, so copying a
/// directory into one of its own descendants terminates.
pub(crate) async fn copy_tree(src_path: &Path, dst_path: &Path) -> Result<()> {
    let entries = WalkDir::new(src_path)
        .min_depth(1)
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    fs::create_dir(dst_path).await?;

    let mut directories = vec![(src_path.to_path_buf(), dst_path.to_path_buf())];
    let mut files = Vec::new();
    for entry in entries {
        let relative = entry
            .path()
            .strip_prefix(src_path)
            .map_err(|_| TestDirectoryError::not_found(entry.path()))?;
        let dst_entry_path = dst_path.join(relative);
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            let target = fs::read_link(entry.path()).await?;
            symlink::native_symlink(&target, &dst_entry_path, entry.path().is_dir())?;
        } else if file_type.is_dir() {
            fs::create_dir(&dst_entry_path).await?;
            directories.push((entry.path().to_path_buf(), dst_entry_path));
        } else {
            files.push(copy_file(entry.path().to_path_buf(), dst_entry_path));
        }
    }

    // Parent directories exist at this point, so files can copy concurrently.
    try_join_all(files).await?;

    // Deepest first, so a read-only parent is applied after its children.
    for (src_dir, dst_dir) in directories.iter().rev() {
        let metadata = fs::metadata(src_dir).await?;
        fs::set_permissions(dst_dir, metadata.permissions()).await?;
    }
    Ok(())
}
