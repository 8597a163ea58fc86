use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::check_output::CheckOutput;
use super::error::Result;

/// The outcome of one finished command.
///
/// A `RunResult` is only ever returned for a command that exited with code
/// zero. A non-zero exit is reported as a
/// [`RunResultError`](crate::RunResultError) carrying the same data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    command: String,
    working_directory: PathBuf,
    stdout: Option<CheckOutput>,
    stderr: Option<CheckOutput>,
    exit_code: i32,
    elapsed_seconds: f64,
}

impl RunResult {
    pub(crate) fn new(
        command: String,
        working_directory: PathBuf,
        stdout: Option<CheckOutput>,
        stderr: Option<CheckOutput>,
        exit_code: i32,
        elapsed_seconds: f64,
    ) -> Self {
        RunResult {
            command,
            working_directory,
            stdout,
            stderr,
            exit_code,
            elapsed_seconds: elapsed_seconds.max(0.0),
        }
    }

    /// The command line as it was invoked.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Captured standard output, `None` when the stream was not captured.
    pub fn stdout(&self) -> Option<&CheckOutput> {
        self.stdout.as_ref()
    }

    /// Captured standard error, `None` when the stream was not captured.
    pub fn stderr(&self) -> Option<&CheckOutput> {
        self.stderr.as_ref()
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn write_stream(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    stream: Option<&CheckOutput>,
) -> fmt::Result {
    match stream {
        Some(output) if output.is_empty() => writeln!(f, "{name}: <empty>"),
        Some(output) => {
            writeln!(f, "{name}:")?;
            writeln!(f, "{}", output.as_str().trim_end_matches('\n'))
        }
        None => writeln!(f, "{name}: <not captured>"),
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RunResult")?;
        writeln!(f, "command: {}", self.command)?;
        writeln!(f, "path: {}", self.working_directory.display())?;
        writeln!(f, "returncode: {}", self.exit_code)?;
        writeln!(f, "time: {:.3}s", self.elapsed_seconds)?;
        write_stream(f, "stdout", self.stdout.as_ref())?;
        write_stream(f, "stderr", self.stderr.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunResult {
        RunResult::new(
            String::from("make all"),
            PathBuf::from("/tmp/work"),
            Some(CheckOutput::new("compiled\n")),
            None,
            0,
            0.25,
        )
    }

    #[test]
    fn display_reports_every_field() {
        let text = sample().to_string();
        assert!(text.contains("command: make all"));
        assert!(text.contains("path: /tmp/work"));
        assert!(text.contains("returncode: 0"));
        assert!(text.contains("time: 0.250s"));
        assert!(text.contains("stdout:\ncompiled\n"));
        assert!(text.contains("stderr: <not captured>"));
    }

    #[test]
    fn json_keeps_stream_text_and_missing_streams() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["command"], "make all");
        assert_eq!(json["stdout"], "compiled\n");
        assert!(json["stderr"].is_null());
        assert_eq!(json["exit_code"], 0);
    }

    #[test]
    fn negative_elapsed_time_is_clamped() {
        let result = RunResult::new(String::new(), PathBuf::new(), None, None, 0, -1.0);
        assert_eq!(result.elapsed_seconds(), 0.0);
        assert!(result.success());
    }
}
