use std::env;
use std::fs;
use std::io;
use std::ops::{Deref, DerefMut};
use std::path::Path;

use rand::Rng;

use super::config::Layout;
use super::error::{Result, TestDirectoryError};
use super::test_directory::TestDirectory;

const KEEP_VAR_NAME: &str = "TESTDIRECTORY_KEEP";

/// A fresh test directory which is removed when the sandbox is dropped.
///
/// The directory gets a random suffix so parallel tests never share it.
/// Set `TESTDIRECTORY_KEEP=Y` to keep the directory for inspection after a
/// failing test; its path is then logged on drop.
///
/// # Example of use in tests
///
/// ```rust
/// use testdirectory::{Result, Sandbox};
///
/// # fn main() -> Result<()> {
/// let sandbox = Sandbox::in_temp_dir("greeting")?;
/// sandbox.write_text("name.txt", "world")?;
///
/// let result = sandbox.run(["cat", "name.txt"])?;
/// assert!(result.stdout().unwrap().matches("world"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Sandbox {
    directory: TestDirectory,
    keep: bool,
}

impl Sandbox {
    fn get_random_code() -> u64 {
        rand::rng().random::<u64>()
    }

    fn keep_requested() -> bool {
        env::var(KEEP_VAR_NAME)
            .map(|value| !value.is_empty() && value != "N")
            .unwrap_or(false)
    }

    /// Creates `<base_dir>/<name>_<random>`. `base_dir` must exist,
    /// an empty `base_dir` means the current directory.
    pub fn new(base_dir: impl AsRef<Path>, name: &str) -> Result<Sandbox> {
        let base_dir = base_dir.as_ref();
        let base_dir = if base_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            base_dir
        };
        if !base_dir.is_dir() {
            return Err(TestDirectoryError::not_found(base_dir));
        }

        let root = base_dir.join(format!("{}_{}", name, Self::get_random_code()));
        fs::create_dir(&root)?;
        tracing::debug!(path = %root.display(), "Sandbox");

        Ok(Sandbox {
            directory: TestDirectory::from_path(&root)?,
            keep: Self::keep_requested(),
        })
    }

    /// Creates the sandbox below the system temporary directory.
    pub fn in_temp_dir(name: &str) -> Result<Sandbox> {
        Sandbox::new(env::temp_dir(), name)
    }

    /// Creates the sandbox and fills it from a YAML or JSON layout.
    ///
    /// The layout is parsed first, so a malformed layout leaves nothing on
    /// disk. If creating an entry fails the sandbox is removed again.
    pub fn from_config(
        config_str: &str,
        base_dir: impl AsRef<Path>,
        name: &str,
    ) -> Result<Sandbox> {
        let layout = Layout::parse(config_str)?;
        let sandbox = Sandbox::new(base_dir, name)?;
        sandbox.populate_layout(&layout)?;
        Ok(sandbox)
    }
}

impl Deref for Sandbox {
    type Target = TestDirectory;

    fn deref(&self) -> &TestDirectory {
        &self.directory
    }
}

impl DerefMut for Sandbox {
    fn deref_mut(&mut self) -> &mut TestDirectory {
        &mut self.directory
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        // Nothing to do when the test already removed it with `rmdir`.
        let Ok(path) = self.directory.path() else {
            return;
        };

        if self.keep {
            tracing::info!(path = %path.display(), "Keeping sandbox");
            return;
        }

        match fs::remove_dir_all(path) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Failed to delete sandbox")
            }
        }
    }
}
