use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::command_line::CommandLine;
use super::copy_tree::{copy_tree, preserve_times};
use super::error::{Result, TestDirectoryError};
use super::path_glob::{basename, expand, expand_single, normalize, rooted_pattern};
use super::run_options::RunOptions;
use super::run_result::RunResult;
use super::runner::run_command;
use super::runtime;
use super::symlink::{native_symlink, SymlinkSupport};
use super::text_encoding::TextEncoding;

#[derive(Debug, Clone, PartialEq, Eq)]
enum HandleState {
    Valid(PathBuf),
    Removed,
}

/// How [`TestDirectory::symlink_file_with`] and
/// [`TestDirectory::symlink_dir_with`] name and point their links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Name of the link. Defaults to the basename of the target.
    pub rename_as: Option<String>,
    /// Store the target relative to the link's directory. Default `true`.
    pub relative: bool,
}

impl LinkOptions {
    pub fn new() -> Self {
        LinkOptions::default()
    }

    pub fn rename_as(mut self, name: impl Into<String>) -> Self {
        self.rename_as = Some(name.into());
        self
    }

    pub fn absolute(mut self) -> Self {
        self.relative = false;
        self
    }
}

impl Default for LinkOptions {
    fn default() -> Self {
        LinkOptions {
            rename_as: None,
            relative: true,
        }
    }
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.is_empty())
}

/// Both paths lead to one file, following symlinks. A missing target is never the same.
fn is_same_file(source: &Path, target: &Path) -> io::Result<bool> {
    match fs::canonicalize(target) {
        Ok(target) => Ok(fs::canonicalize(source)? == target),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}

/// A directory used as the working area of a test.
///
/// Testing code by invoking executables which create and delete files and
/// directories is error prone. A `TestDirectory` wraps one existing
/// directory and lets the test populate it, run a command inside it and
/// inspect what the command left behind.
///
/// # Example of use in tests
///
/// ```rust,no_run
/// use testdirectory::{Result, TestDirectory};
///
/// fn compresses_images(testdirectory: &TestDirectory) -> Result<()> {
///     let images = testdirectory.mkdir("images")?;
///     images.copy_files("test/images/*")?;
///
///     let result = testdirectory.run("imagecompress --path=images")?;
///     assert!(result.stdout().unwrap().matches("*compressed*"));
///     assert!(images.contains_file("*.jpg.z")?);
///     Ok(())
/// }
/// ```
///
/// Paths given to operations are relative to the root of the handle, except
/// for the sources of copies and symlinks. Those are patterns resolved as
/// given, absolute or relative to the current directory of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDirectory {
    state: HandleState,
}

impl TestDirectory {
    fn valid(path: PathBuf) -> Self {
        TestDirectory {
            state: HandleState::Valid(path),
        }
    }

    fn root(&self) -> Result<&Path> {
        match &self.state {
            HandleState::Valid(path) => Ok(path),
            HandleState::Removed => Err(TestDirectoryError::InvalidHandle),
        }
    }

    /// Wraps an existing directory, for example a fresh temporary directory
    /// handed out by the test harness.
    pub fn from_path(path: impl AsRef<Path>) -> Result<TestDirectory> {
        let path = normalize(path.as_ref())?;
        if !path.is_dir() {
            return Err(TestDirectoryError::not_found(path));
        }
        Ok(TestDirectory::valid(path))
    }

    /// The absolute path of the directory.
    pub fn path(&self) -> Result<&Path> {
        self.root()
    }

    /// Creates a sub-directory, with any missing parents. Creating a directory
    /// which already exists is not an error.
    pub fn mkdir(&self, directory: impl AsRef<Path>) -> Result<TestDirectory> {
        let path = normalize(&self.root()?.join(directory))?;
        fs::create_dir_all(&path)?;
        tracing::debug!(path = %path.display(), "Mkdir");
        Ok(TestDirectory::valid(path))
    }

    /// Removes the directory with all its content and invalidates the handle.
    /// Removing a directory which is already gone is not an error.
    pub fn rmdir(&mut self) -> Result<()> {
        let path = self.root()?;
        match fs::remove_dir_all(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Rmdir"),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(error.into()),
        }
        self.state = HandleState::Removed;
        Ok(())
    }

    /// A handle for an existing directory below the root.
    pub fn join<I, S>(&self, segments: I) -> Result<TestDirectory>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut path = self.root()?.to_path_buf();
        path.extend(segments);
        let path = normalize(&path)?;
        if !path.is_dir() {
            return Err(TestDirectoryError::not_found(path));
        }
        Ok(TestDirectory::valid(path))
    }

    /// Removes one regular file.
    pub fn rmfile(&self, filename: impl AsRef<Path>) -> Result<()> {
        let path = self.root()?.join(filename);
        if !path.is_file() {
            return Err(TestDirectoryError::not_found(path));
        }
        fs::remove_file(&path)?;
        tracing::debug!(path = %path.display(), "Rmfile");
        Ok(())
    }

    /// Copies the single file matched by `filename` into the directory.
    ///
    /// `filename` may contain wildcards, for example `build/app-*.tar`, but
    /// it must match exactly one entry. Returns the path of the copy.
    pub fn copy_file(&self, filename: impl AsRef<Path>) -> Result<PathBuf> {
        let source = expand_single(&filename.as_ref().to_string_lossy())?;
        self.copy_matched_file(&source, None)
    }

    /// Like [`copy_file`](Self::copy_file), storing the copy as `rename_as`.
    pub fn copy_file_as(&self, filename: impl AsRef<Path>, rename_as: &str) -> Result<PathBuf> {
        let source = expand_single(&filename.as_ref().to_string_lossy())?;
        self.copy_matched_file(&source, non_empty(Some(rename_as)))
    }

    /// Copies every file matched by `pattern`. Matching nothing copies nothing.
    pub fn copy_files(&self, pattern: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let root = self.root()?;
        let mut copies = Vec::new();
        for source in expand(&pattern.as_ref().to_string_lossy())? {
            if source.is_file() {
                copies.push(self.copy_matched_file(&source, None)?);
            } else {
                tracing::warn!(path = %source.display(), root = %root.display(), "Skip non-file");
            }
        }
        Ok(copies)
    }

    fn copy_matched_file(&self, source: &Path, rename_as: Option<&str>) -> Result<PathBuf> {
        let root = self.root()?;
        let metadata = fs::metadata(source)?;
        if !metadata.is_file() {
            return Err(TestDirectoryError::not_found(source));
        }

        let target = match rename_as {
            Some(name) => root.join(name),
            None => root.join(basename(source)?),
        };
        // Copying a file onto itself truncates it.
        if is_same_file(source, &target)? {
            return Err(TestDirectoryError::SameFile(target));
        }
        fs::copy(source, &target)?;
        preserve_times(&metadata, &target)?;

        tracing::debug!(source = %source.display(), target = %target.display(), "Copy");
        Ok(target)
    }

    /// Copies a whole directory tree into a new sub-directory named after
    /// the last component of `directory`.
    ///
    /// ```rust,no_run
    /// # use testdirectory::{Result, TestDirectory};
    /// # fn copy(testdirectory: &TestDirectory) -> Result<()> {
    /// // /tmp/sandbox_42/app
    /// let app_dir = testdirectory.copy_dir("/home/ok/app")?;
    /// assert!(app_dir.contains_file("Cargo.toml")?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn copy_dir(&self, directory: impl AsRef<Path>) -> Result<TestDirectory> {
        let name = basename(directory.as_ref())?;
        self.copy_dir_as(directory.as_ref(), &name)
    }

    pub(super) fn copy_dir_as(&self, directory: &Path, name: &Path) -> Result<TestDirectory> {
        let source = normalize(directory)?;
        if !source.is_dir() {
            return Err(TestDirectoryError::not_found(source));
        }

        let target = self.root()?.join(name);
        if fs::symlink_metadata(&target).is_ok() {
            return Err(TestDirectoryError::already_exists(target));
        }

        runtime::block_on(copy_tree(&source, &target))??;

        tracing::debug!(source = %source.display(), target = %target.display(), "Copy dir");
        Ok(TestDirectory::valid(target))
    }

    /// Creates a symlink to the single file matched by `filename`.
    /// Returns the path of the link.
    pub fn symlink_file(&self, filename: impl AsRef<Path>) -> Result<PathBuf> {
        self.symlink_file_with(filename, &LinkOptions::default())
    }

    pub fn symlink_file_with(
        &self,
        filename: impl AsRef<Path>,
        options: &LinkOptions,
    ) -> Result<PathBuf> {
        self.create_link(filename.as_ref(), options, false)
    }

    /// Creates a symlink to the single directory matched by `directory`.
    /// Returns the path of the link.
    pub fn symlink_dir(&self, directory: impl AsRef<Path>) -> Result<PathBuf> {
        self.symlink_dir_with(directory, &LinkOptions::default())
    }

    pub fn symlink_dir_with(
        &self,
        directory: impl AsRef<Path>,
        options: &LinkOptions,
    ) -> Result<PathBuf> {
        self.create_link(directory.as_ref(), options, true)
    }

    pub(super) fn create_link(
        &self,
        pattern: &Path,
        options: &LinkOptions,
        is_dir: bool,
    ) -> Result<PathBuf> {
        let root = self.root()?;
        let resolved = normalize(&expand_single(&pattern.to_string_lossy())?)?;
        if resolved.is_dir() != is_dir {
            return Err(TestDirectoryError::not_found(resolved));
        }

        let link_name = match non_empty(options.rename_as.as_deref()) {
            Some(name) => root.join(name),
            None => root.join(basename(&resolved)?),
        };

        let target = if options.relative {
            let link_dir = link_name.parent().unwrap_or(root);
            pathdiff::diff_paths(&resolved, link_dir)
                .ok_or_else(|| TestDirectoryError::not_found(&resolved))?
        } else {
            resolved.clone()
        };

        self.create_symlink(&target, &resolved, &link_name, is_dir)?;

        tracing::debug!(target = %target.display(), link = %link_name.display(), "Symlink");
        Ok(link_name)
    }

    fn create_symlink(
        &self,
        target: &Path,
        resolved: &Path,
        link_name: &Path,
        is_dir: bool,
    ) -> Result<()> {
        match SymlinkSupport::current() {
            SymlinkSupport::Native => Ok(native_symlink(target, link_name, is_dir)?),
            // Junctions only take absolute targets.
            SymlinkSupport::DirectoryJunction if is_dir => {
                let command = format!(
                    "mklink /J \"{}\" \"{}\"",
                    link_name.to_string_lossy().replace('/', "\\"),
                    resolved.to_string_lossy().replace('/', "\\"),
                );
                self.run(command)?;
                Ok(())
            }
            SymlinkSupport::DirectoryJunction => {
                Err(TestDirectoryError::PlatformUnsupported("files"))
            }
            SymlinkSupport::Unsupported => Err(TestDirectoryError::PlatformUnsupported(
                if is_dir { "directories" } else { "files" },
            )),
        }
    }

    /// Writes UTF-8 text, replacing any existing file. Returns the file path.
    pub fn write_text(&self, filename: impl AsRef<Path>, data: &str) -> Result<PathBuf> {
        self.write_text_encoded(filename, data, TextEncoding::Utf8)
    }

    pub fn write_text_encoded(
        &self,
        filename: impl AsRef<Path>,
        data: &str,
        encoding: TextEncoding,
    ) -> Result<PathBuf> {
        let bytes = encoding.encode(data)?;
        self.write_binary(filename, bytes)
    }

    /// Writes raw bytes, replacing any existing file. Returns the file path.
    pub fn write_binary(
        &self,
        filename: impl AsRef<Path>,
        data: impl AsRef<[u8]>,
    ) -> Result<PathBuf> {
        let path = self.root()?.join(filename);
        fs::write(&path, data)?;
        tracing::debug!(path = %path.display(), "Write");
        Ok(path)
    }

    /// Checks for a file below the root. `pattern` may contain wildcards.
    ///
    /// Returns `false` when nothing matches and fails with
    /// [`Ambiguous`](TestDirectoryError::Ambiguous) when several entries do.
    pub fn contains_file(&self, pattern: &str) -> Result<bool> {
        let matches = expand(&rooted_pattern(self.root()?, [pattern]))?;
        match matches.as_slice() {
            [] => Ok(false),
            [path] => Ok(path.is_file()),
            _ => Err(TestDirectoryError::ambiguous(pattern, matches.len())),
        }
    }

    /// Checks for an entry below the root, following symlinks. The segments
    /// are joined and may contain wildcards, e.g. `["sub*", "s*5"]`.
    ///
    /// Unlike [`contains_file`](Self::contains_file) several matches give
    /// `false` rather than an error.
    pub fn contains_dir<I, S>(&self, segments: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matches = expand(&rooted_pattern(self.root()?, segments))?;
        match matches.as_slice() {
            [path] => Ok(path.exists()),
            _ => Ok(false),
        }
    }

    /// Runs a command with the directory as working directory.
    ///
    /// A non-zero exit code is returned as
    /// [`ProcessFailure`](TestDirectoryError::ProcessFailure).
    pub fn run(&self, command: impl Into<CommandLine>) -> Result<RunResult> {
        self.run_with(command, RunOptions::default())
    }

    pub fn run_with(
        &self,
        command: impl Into<CommandLine>,
        options: RunOptions,
    ) -> Result<RunResult> {
        run_command(command.into(), options, self.root()?)
    }
}

impl fmt::Display for TestDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            HandleState::Valid(path) => write!(f, "{}", path.display()),
            HandleState::Removed => f.write_str("<removed>"),
        }
    }
}

impl TryFrom<PathBuf> for TestDirectory {
    type Error = TestDirectoryError;

    fn try_from(path: PathBuf) -> Result<Self> {
        TestDirectory::from_path(path)
    }
}
