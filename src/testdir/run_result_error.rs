use std::fmt;
use std::ops::Deref;

use super::run_result::RunResult;

/// A command finished with a non-zero exit code.
///
/// The error derefs to the [`RunResult`] of the failed command, so a test
/// catching it can inspect the same fields as for a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResultError {
    result: Box<RunResult>,
}

impl RunResultError {
    pub(crate) fn new(result: RunResult) -> Self {
        debug_assert!(!result.success());
        RunResultError {
            result: Box::new(result),
        }
    }

    pub fn result(&self) -> &RunResult {
        &self.result
    }

    pub fn into_result(self) -> RunResult {
        *self.result
    }
}

impl Deref for RunResultError {
    type Target = RunResult;

    fn deref(&self) -> &RunResult {
        &self.result
    }
}

impl fmt::Display for RunResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The command `{}` exited with code {}.\n{}",
            self.result.command(),
            self.result.exit_code(),
            self.result
        )
    }
}

impl std::error::Error for RunResultError {}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::testdir::check_output::CheckOutput;

    #[test]
    fn error_exposes_the_failed_result() {
        let error = RunResultError::new(RunResult::new(
            String::from("false"),
            PathBuf::from("/tmp"),
            Some(CheckOutput::new("")),
            Some(CheckOutput::new("failed badly\n")),
            1,
            0.01,
        ));

        assert_eq!(error.exit_code(), 1);
        assert!(error.stderr().unwrap().matches("*badly*"));
        assert!(error
            .to_string()
            .starts_with("The command `false` exited with code 1."));
        assert_eq!(error.clone().into_result().command(), "false");
    }
}
