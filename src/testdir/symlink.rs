//! Symbolic link creation and the platform capability behind it.
use std::io;
use std::path::Path;
use std::sync::OnceLock;

/// How this process can create symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymlinkSupport {
    /// The OS primitive works for files and directories.
    Native,
    /// Only directory links, created through the `mklink /J` shell command.
    DirectoryJunction,
    /// No way to create links.
    Unsupported,
}

impl SymlinkSupport {
    /// Resolved once per process.
    pub fn current() -> SymlinkSupport {
        static SUPPORT: OnceLock<SymlinkSupport> = OnceLock::new();
        *SUPPORT.get_or_init(detect)
    }
}

#[cfg(unix)]
fn detect() -> SymlinkSupport {
    SymlinkSupport::Native
}

// Creating symlinks on Windows needs a privilege (or developer mode), so probe once.
#[cfg(windows)]
fn detect() -> SymlinkSupport {
    let probe = std::env::temp_dir().join(format!("testdirectory_probe_{}", rand::random::<u64>()));
    let link = probe.with_extension("link");
    let support = match std::fs::create_dir(&probe)
        .and_then(|_| std::os::windows::fs::symlink_dir(&probe, &link))
    {
        Ok(()) => SymlinkSupport::Native,
        Err(_) => SymlinkSupport::DirectoryJunction,
    };
    let _ = std::fs::remove_dir(&link);
    let _ = std::fs::remove_dir(&probe);
    tracing::debug!(?support, "Symlink support");
    support
}

#[cfg(not(any(unix, windows)))]
fn detect() -> SymlinkSupport {
    SymlinkSupport::Unsupported
}

/// Creates `link` pointing at `target` with the native primitive.
#[cfg(unix)]
pub(crate) fn native_symlink(target: &Path, link: &Path, _is_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
pub(crate) fn native_symlink(target: &Path, link: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(not(any(unix, windows)))]
pub(crate) fn native_symlink(_target: &Path, _link: &Path, _is_dir: bool) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not available",
    ))
}
