//! This library provides a scratch directory for tests which invoke external executables.
//! A test populates the directory by copying, linking or writing files, runs a command
//! inside it and asserts on the captured output and on the resulting directory tree.
//!
//! ```rust
//! use testdirectory::{Result, Sandbox};
//!
//! # fn main() -> Result<()> {
//! let sandbox = Sandbox::in_temp_dir("docs")?;
//! let sub1 = sandbox.mkdir("sub1")?;
//! sub1.write_text("ok.txt", "hello_world")?;
//!
//! let sub2 = sandbox.mkdir("sub2")?;
//! sub2.copy_file(sub1.path()?.join("*.txt"))?;
//! assert!(sub2.contains_file("ok.txt")?);
//!
//! let result = sandbox.run("echo hi")?;
//! assert!(result.stdout().unwrap().matches("*hi*"));
//! # Ok(())
//! # }
//! ```

pub mod testdir;

pub use testdir::config;
pub use testdir::check_output::CheckOutput;
pub use testdir::command_line::CommandLine;
pub use testdir::error::{Result, TestDirectoryError};
pub use testdir::run_options::{Capture, RunOptions};
pub use testdir::run_result::RunResult;
pub use testdir::run_result_error::RunResultError;
pub use testdir::sandbox::Sandbox;
pub use testdir::symlink::SymlinkSupport;
pub use testdir::test_directory::{LinkOptions, TestDirectory};
pub use testdir::text_encoding::TextEncoding;
