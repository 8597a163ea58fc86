//! The `config` module describes the content of a test directory declaratively.
//! Layouts can hold directories, files, links and copies of existing directories.

pub mod clone_directory_conf;
pub mod directory_conf;
pub mod file_conf;
pub mod file_content;
pub mod layout;
pub mod layout_entry;
pub mod link_conf;

pub use clone_directory_conf::CloneDirectoryConf;
pub use directory_conf::DirectoryConf;
pub use file_conf::FileConf;
pub use file_content::FileContent;
pub use layout::Layout;
pub use layout_entry::LayoutEntry;
pub use link_conf::LinkConf;
