use serde::{Deserialize, Serialize};

use super::layout_entry::LayoutEntry;

/// Structure for directory record in a layout
/// for example:
///
/// ## yaml:
///
/// ```yaml
/// ---
///   - !directory
///       name: images
///       content:
///         - !file
///             name: notes.txt
///             content: !empty
///         - !link
///             name: logo.png
///             target: assets/logo.png
/// ```
///
/// ## json:
///
/// ```json
/// [
///     {
///         "directory": {
///             "name": "images",
///             "content": [
///                 { "file": { "name": "notes.txt", "content": "empty" } },
///                 { "link": { "name": "logo.png", "target": "assets/logo.png" } }
///             ]
///         }
///     }
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct DirectoryConf {
    /// A directory will be created with the given name, or reused if it exists.
    pub name: String,

    /// The directory content can contain a list of various entries.
    #[serde(default)]
    pub content: Vec<LayoutEntry>,
}
