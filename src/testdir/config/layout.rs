use serde::{Deserialize, Serialize};

use super::layout_entry::LayoutEntry;
use crate::testdir::error::{Result, TestDirectoryError};

/// The content to create inside a test directory, as a list of entries.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Layout(pub Vec<LayoutEntry>);

impl Layout {
    /// The layout parser
    /// The layout can be given as a string in YAML or JSON format.
    /// A string starting with `{` or `[` is read as JSON, anything else as YAML.
    ///
    /// # YAML Example
    ///
    /// ```rust
    /// # use testdirectory::config::{DirectoryConf, FileConf, FileContent, Layout, LayoutEntry};
    /// let simple_conf_str = "---
    ///   - !directory
    ///       name: data
    ///       content:
    ///         - !file
    ///             name: test.txt
    ///             content:
    ///               !inline_bytes
    ///                 - 116
    ///                 - 101
    ///                 - 115
    ///                 - 116
    /// ";
    /// let layout = Layout(vec![LayoutEntry::Directory(DirectoryConf {
    ///     name: String::from("data"),
    ///     content: vec![LayoutEntry::File(FileConf {
    ///         name: String::from("test.txt"),
    ///         content: FileContent::InlineBytes(b"test".to_vec()),
    ///     })],
    /// })]);
    /// assert_eq!(layout, Layout::parse(simple_conf_str).unwrap());
    /// ```
    ///
    /// ## JSON Example
    ///
    /// ```rust
    /// # use testdirectory::config::{FileConf, FileContent, Layout, LayoutEntry};
    /// let simple_conf_str = r#"[{"file":{"name":"test.txt","content":{"inline_text":"test"}}}]"#;
    /// # let layout = Layout(vec![LayoutEntry::File(FileConf {
    /// #     name: String::from("test.txt"),
    /// #     content: FileContent::InlineText(String::from("test")),
    /// # })]);
    /// assert_eq!(layout, Layout::parse(simple_conf_str).unwrap());
    /// ```
    pub fn parse(config_str: &str) -> Result<Layout> {
        match config_str.trim_start().chars().next() {
            Some('{') | Some('[') => Ok(serde_json::from_str(config_str)?),
            Some(_) => Ok(serde_yaml::from_str(config_str)?),
            None => Err(TestDirectoryError::EmptyConfig),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testdir::config::{
        CloneDirectoryConf, DirectoryConf, FileConf, FileContent, LinkConf,
    };
    use crate::testdir::text_encoding::TextEncoding;

    #[test]
    fn parser_should_reject_empty_config() {
        assert!(matches!(
            Layout::parse("  \n"),
            Err(TestDirectoryError::EmptyConfig)
        ));
    }

    #[test]
    fn parser_should_accept_yaml_with_every_entry_kind() {
        let conf_str = r#"
    - !directory
        name: test
        content:
        - !file
            name: bytes.bin
            content:
              !inline_bytes
              - 116
              - 101
        - !file
            name: text.txt
            content:
              !inline_text test
        - !file
            name: copy.toml
            content:
              !original_file Cargo.toml
        - !file
            name: empty.txt
            content: !empty
        - !link
            name: test_link.txt
            target: text.txt
            relative: false
    - !clone_directory
        name: copy
        source: src
    "#;
        let layout = Layout(vec![
            LayoutEntry::Directory(DirectoryConf {
                name: String::from("test"),
                content: vec![
                    LayoutEntry::File(FileConf {
                        name: String::from("bytes.bin"),
                        content: FileContent::InlineBytes(vec![116, 101]),
                    }),
                    LayoutEntry::File(FileConf {
                        name: String::from("text.txt"),
                        content: FileContent::InlineText(String::from("test")),
                    }),
                    LayoutEntry::File(FileConf {
                        name: String::from("copy.toml"),
                        content: FileContent::OriginalFile(String::from("Cargo.toml")),
                    }),
                    LayoutEntry::File(FileConf {
                        name: String::from("empty.txt"),
                        content: FileContent::Empty,
                    }),
                    LayoutEntry::Link(LinkConf {
                        name: String::from("test_link.txt"),
                        target: String::from("text.txt"),
                        relative: false,
                    }),
                ],
            }),
            LayoutEntry::CloneDirectory(CloneDirectoryConf {
                name: String::from("copy"),
                source: String::from("src"),
            }),
        ]);

        assert_eq!(layout, Layout::parse(conf_str).unwrap());
    }

    #[test]
    fn link_is_relative_unless_told_otherwise() {
        let layout = Layout::parse(r#"[{"link":{"name":"l","target":"t"}}]"#).unwrap();
        assert_eq!(
            layout,
            Layout(vec![LayoutEntry::Link(LinkConf {
                name: String::from("l"),
                target: String::from("t"),
                relative: true,
            })])
        );
    }

    #[test]
    fn encoded_text_defaults_to_utf8() {
        let layout = Layout::parse(
            r#"[{"file":{"name":"a.txt","content":{"encoded_text":{"text":"a"}}}},
               {"file":{"name":"b.txt","content":{"encoded_text":{
                   "text":"b","encoding":"utf-16-le"}}}}]"#,
        )
        .unwrap();
        assert_eq!(
            layout,
            Layout(vec![
                LayoutEntry::File(FileConf {
                    name: String::from("a.txt"),
                    content: FileContent::EncodedText {
                        text: String::from("a"),
                        encoding: TextEncoding::Utf8,
                    },
                }),
                LayoutEntry::File(FileConf {
                    name: String::from("b.txt"),
                    content: FileContent::EncodedText {
                        text: String::from("b"),
                        encoding: TextEncoding::Utf16Le,
                    },
                }),
            ])
        );
    }

    #[test]
    fn directory_content_may_be_omitted() {
        let layout = Layout::parse("- !directory\n    name: out\n").unwrap();
        assert_eq!(
            layout,
            Layout(vec![LayoutEntry::Directory(DirectoryConf {
                name: String::from("out"),
                content: Vec::new(),
            })])
        );
    }

    #[test]
    fn serialization_for_simple_yaml_layout() {
        let layout = Layout(vec![LayoutEntry::Directory(DirectoryConf {
            name: String::from("."),
            content: Vec::new(),
        })]);

        assert_eq!(
            String::from("- !directory\n  name: .\n  content: []\n"),
            serde_yaml::to_string(&layout).unwrap(),
        );
    }

    #[test]
    fn serialization_for_simple_json_layout() {
        let layout = Layout(vec![LayoutEntry::Directory(DirectoryConf {
            name: String::from("."),
            content: Vec::new(),
        })]);

        assert_eq!(
            String::from("[{\"directory\":{\"name\":\".\",\"content\":[]}}]"),
            serde_json::to_string(&layout).unwrap(),
        );
    }

    #[test]
    fn malformed_json_is_reported_as_json_error() {
        assert!(matches!(
            Layout::parse("[{\"directory\":"),
            Err(TestDirectoryError::Json(_))
        ));
    }
}
