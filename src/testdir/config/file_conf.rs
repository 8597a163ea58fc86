use serde::{Deserialize, Serialize};

use super::file_content::FileContent;

/// The structure for file records in a layout.
///
/// ### yaml:
///
/// ```yaml
/// - !file
///     name: input.txt
///     content: !inline_text "1 2 3"
/// ```
///
/// ### json:
///
/// ```json
/// "file": {
///   "name": "input.txt",
///   "content": { "inline_text": "1 2 3" }
/// }
/// ```
///
/// See [`FileContent`] for the other ways to give the content.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct FileConf {
    pub name: String,
    pub content: FileContent,
}
