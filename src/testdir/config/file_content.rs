use serde::{Deserialize, Serialize};

use crate::testdir::text_encoding::TextEncoding;

/// What a `!file` entry writes:
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FileContent {
    /// InlineBytes - by byte vector:
    ///
    /// ```yaml
    /// - !file
    ///     name: magic.bin
    ///     content:
    ///         !inline_bytes
    ///             - 127
    ///             - 69
    ///             - 76
    ///             - 70
    /// ```
    InlineBytes(Vec<u8>),
    /// InlineText - by usual string of text, stored as UTF-8:
    ///
    /// ```yaml
    /// - !file
    ///     name: input.txt
    ///     content: !inline_text hello
    /// ```
    InlineText(String),
    /// EncodedText - text stored with an explicit [`TextEncoding`]:
    ///
    /// ```yaml
    /// - !file
    ///     name: legacy.txt
    ///     content: !encoded_text
    ///         text: "café"
    ///         encoding: latin-1
    /// ```
    EncodedText {
        text: String,
        #[serde(default)]
        encoding: TextEncoding,
    },
    /// OriginalFile - copy of a real file. The path may contain wildcards
    /// but must match exactly one file:
    ///
    /// ```yaml
    /// - !file
    ///     name: app.tar
    ///     content: !original_file "build/app-*.tar"
    /// ```
    OriginalFile(String),
    /// or simply Empty
    ///
    /// ```yaml
    /// - !file
    ///     name: .keep
    ///     content: !empty
    /// ```
    Empty,
}
