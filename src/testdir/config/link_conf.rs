use serde::{Deserialize, Serialize};

fn relative_by_default() -> bool {
    true
}

/// A symbolic link to an existing file or directory.
///
/// The target may contain wildcards but must match exactly one entry.
/// Whether a file or a directory link is created follows the target.
///
/// ### yaml
///
/// ```yaml
/// - !link
///     name: tool
///     target: target/debug/tool
///     relative: false
/// ```
///
/// ### json
/// ```json
/// "link": {
///   "name": "tool",
///   "target": "target/debug/tool"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct LinkConf {
    pub name: String,
    pub target: String,
    /// Store the target as a path relative to the link. Default `true`.
    #[serde(default = "relative_by_default")]
    pub relative: bool,
}
