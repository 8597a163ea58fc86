use serde::{Deserialize, Serialize};

/// Copy of an existing directory tree, stored under a new name.
///
/// ## yaml:
///
/// ```yaml
/// ---
///   - !clone_directory
///       name: fixtures
///       source: tests/data
/// ```
///
/// ## json:
///
/// ```json
/// [
///     {
///         "clone_directory": {
///             "name": "fixtures",
///             "source": "tests/data"
///         }
///     }
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct CloneDirectoryConf {
    /// The copy is created with this name. It must not exist yet.
    pub name: String,

    /// The directory to copy, absolute or relative to the current directory.
    pub source: String,
}
