//! The `testdir` module provides the test directory handle, command execution
//! inside it, inspection of the results and declarative layouts.

pub mod check_output;
pub mod command_line;
pub mod config;
mod copy_tree;
pub mod error;
mod path_glob;
mod populate;
pub mod run_options;
pub mod run_result;
pub mod run_result_error;
mod runner;
mod runtime;
pub mod sandbox;
pub mod symlink;
pub mod test_directory;
pub mod text_encoding;
