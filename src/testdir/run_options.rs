use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// What happens to one output stream of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capture {
    /// Buffer the stream and expose it as a [`CheckOutput`](crate::CheckOutput).
    #[default]
    Pipe,
    /// Let the stream go to the parent's stream. Nothing is captured.
    Inherit,
    /// Discard the stream. Nothing is captured.
    Null,
}

impl Capture {
    pub(crate) fn is_captured(self) -> bool {
        self == Capture::Pipe
    }

    pub(crate) fn stdio(self) -> Stdio {
        match self {
            Capture::Pipe => Stdio::piped(),
            Capture::Inherit => Stdio::inherit(),
            Capture::Null => Stdio::null(),
        }
    }
}

type Configure = Box<dyn FnOnce(&mut Command) + Send>;

/// Settings for one [`TestDirectory::run_with`](crate::TestDirectory::run_with) call.
///
/// ```rust
/// # use testdirectory::{Capture, RunOptions};
/// let options = RunOptions::new()
///     .env_var("RUST_LOG", "debug")
///     .stderr(Capture::Inherit);
/// # let _ = options;
/// ```
pub struct RunOptions {
    /// Run the command through `sh -c` (or `cmd /C` on Windows). Default `true`.
    pub(crate) shell: bool,
    /// The complete environment of the child. Default: a copy of the
    /// current process environment taken when the command starts.
    pub(crate) env: Option<HashMap<OsString, OsString>>,
    /// Variables set on top of the environment above.
    pub(crate) extra_env: Vec<(OsString, OsString)>,
    /// Working directory. Default: the root of the test directory.
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) stdout: Capture,
    pub(crate) stderr: Capture,
    pub(crate) configure: Option<Configure>,
}

impl RunOptions {
    pub fn new() -> Self {
        RunOptions::default()
    }

    pub fn shell(mut self, shell: bool) -> Self {
        self.shell = shell;
        self
    }

    /// Replaces the whole child environment.
    pub fn env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.env = Some(
            vars.into_iter()
                .map(|(key, value)| (key.as_ref().to_os_string(), value.as_ref().to_os_string()))
                .collect(),
        );
        self
    }

    /// Sets one variable, keeping the rest of the environment.
    pub fn env_var(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.extra_env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn stdout(mut self, capture: Capture) -> Self {
        self.stdout = capture;
        self
    }

    pub fn stderr(mut self, capture: Capture) -> Self {
        self.stderr = capture;
        self
    }

    /// Applies any other spawn setting to the underlying
    /// [`std::process::Command`] right before it starts.
    pub fn configure<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut Command) + Send + 'static,
    {
        self.configure = Some(Box::new(configure));
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            shell: true,
            env: None,
            extra_env: Vec::new(),
            cwd: None,
            stdout: Capture::Pipe,
            stderr: Capture::Pipe,
            configure: None,
        }
    }
}

impl fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("shell", &self.shell)
            .field("env", &self.env.as_ref().map(|env| env.len()))
            .field("extra_env", &self.extra_env)
            .field("cwd", &self.cwd)
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("configure", &self.configure.is_some())
            .finish()
    }
}
