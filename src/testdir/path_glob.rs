//! Wildcard lookup of paths on the file system.
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use super::error::{Result, TestDirectoryError};

const PATH_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A pattern which is not valid glob syntax, like `a[1.txt`, stands for
/// itself, the same way [`CheckOutput::matches`] treats it.
///
/// [`CheckOutput::matches`]: super::check_output::CheckOutput::matches
fn literal_if_invalid(pattern: &str) -> Cow<'_, str> {
    match Pattern::new(pattern) {
        Ok(_) => Cow::Borrowed(pattern),
        Err(_) => Cow::Owned(Pattern::escape(pattern)),
    }
}

/// Expands a pattern, absolute or relative to the current directory,
/// into every existing path it matches.
pub(crate) fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob::glob_with(&literal_if_invalid(pattern), PATH_MATCH_OPTIONS)? {
        paths.push(entry?);
    }
    Ok(paths)
}

/// Expands a pattern which must match exactly one path.
pub(crate) fn expand_single(pattern: &str) -> Result<PathBuf> {
    let mut paths = expand(pattern)?;
    match paths.len() {
        1 => Ok(paths.remove(0)),
        matches => Err(TestDirectoryError::ambiguous(pattern, matches)),
    }
}

/// Builds a pattern rooted at `root`. The root itself is escaped so only
/// the metacharacters of `relative` take part in matching.
pub(crate) fn rooted_pattern<I, S>(root: &Path, relative: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pattern = PathBuf::from(Pattern::escape(&root.to_string_lossy()));
    for segment in relative {
        pattern.push(&*literal_if_invalid(segment.as_ref()));
    }
    pattern.to_string_lossy().into_owned()
}

/// Makes `path` absolute against the current directory and folds `.` and
/// `..` components without touching the file system.
pub(crate) fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// The last component of a normalized path.
pub(crate) fn basename(path: &Path) -> Result<PathBuf> {
    let normalized = normalize(path)?;
    normalized
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| TestDirectoryError::not_found(path))
}
