//! TestDirectoryError is returned by every fallible operation of the crate.
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::run_result::RunResult;
use super::run_result_error::RunResultError;

pub type Result<T> = std::result::Result<T, TestDirectoryError>;

/// Errors raised by test directory operations
#[derive(Debug, Error)]
pub enum TestDirectoryError {
    /// A referenced path does not exist or has the wrong kind.
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A pattern used for single-match resolution did not match exactly one entry.
    #[error("The pattern `{pattern}` matched {matches} entries, exactly one was expected.")]
    Ambiguous { pattern: String, matches: usize },

    #[error("Destination already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The source of a copy is the destination itself.
    #[error("Cannot copy a file onto itself: {}", .0.display())]
    SameFile(PathBuf),

    /// The command exited with a non-zero code.
    #[error(transparent)]
    ProcessFailure(#[from] RunResultError),

    #[error("Symbolic links to {0} are not supported on this platform.")]
    PlatformUnsupported(&'static str),

    #[error("The test directory was removed, the handle is no longer valid.")]
    InvalidHandle,

    #[error("The command should not be empty.")]
    EmptyCommand,

    #[error("The text cannot be encoded as {encoding}: {reason}")]
    Encoding {
        encoding: &'static str,
        reason: String,
    },

    #[error("The configuration should not be empty.")]
    EmptyConfig,

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("The configuration does not satisfy the yaml format: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("The configuration does not satisfy the json format: {0}")]
    Json(#[from] serde_json::Error),
}

impl TestDirectoryError {
    pub(crate) fn not_found(path: impl AsRef<Path>) -> Self {
        TestDirectoryError::NotFound(path.as_ref().to_path_buf())
    }

    pub(crate) fn ambiguous(pattern: &str, matches: usize) -> Self {
        TestDirectoryError::Ambiguous {
            pattern: pattern.to_string(),
            matches,
        }
    }

    pub(crate) fn already_exists(path: impl AsRef<Path>) -> Self {
        TestDirectoryError::AlreadyExists(path.as_ref().to_path_buf())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TestDirectoryError::NotFound(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, TestDirectoryError::Ambiguous { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, TestDirectoryError::AlreadyExists(_))
    }

    pub fn is_same_file(&self) -> bool {
        matches!(self, TestDirectoryError::SameFile(_))
    }

    pub fn is_process_failure(&self) -> bool {
        matches!(self, TestDirectoryError::ProcessFailure(_))
    }

    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, TestDirectoryError::InvalidHandle)
    }

    pub fn is_platform_unsupported(&self) -> bool {
        matches!(self, TestDirectoryError::PlatformUnsupported(_))
    }

    /// The result of the failed command when this is a process failure.
    pub fn run_result(&self) -> Option<&RunResult> {
        match self {
            TestDirectoryError::ProcessFailure(error) => Some(error.result()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_message_names_pattern_and_count() {
        let error = TestDirectoryError::ambiguous("build/*.so", 3);
        assert!(error.is_ambiguous());
        assert_eq!(
            error.to_string(),
            "The pattern `build/*.so` matched 3 entries, exactly one was expected."
        );
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn fails() -> Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))?;
            Ok(())
        }

        let error = fails().unwrap_err();
        assert!(matches!(error, TestDirectoryError::Io(_)));
        assert!(error.run_result().is_none());
    }
}
