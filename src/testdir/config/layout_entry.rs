use serde::{Deserialize, Serialize};

use super::{
    clone_directory_conf::CloneDirectoryConf, directory_conf::DirectoryConf, file_conf::FileConf,
    link_conf::LinkConf,
};

/// One entry of a layout
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEntry {
    Directory(DirectoryConf),
    File(FileConf),
    Link(LinkConf),
    CloneDirectory(CloneDirectoryConf),
}
