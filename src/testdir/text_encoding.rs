use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{Result, TestDirectoryError};

/// Byte representation used by
/// [`TestDirectory::write_text_encoded`](crate::TestDirectory::write_text_encoded)
/// and by `!encoded_text` layout entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "utf-16-le", alias = "utf16le")]
    Utf16Le,
    #[serde(rename = "utf-16-be", alias = "utf16be")]
    Utf16Be,
    /// ISO-8859-1, one byte per character up to U+00FF.
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
    #[serde(rename = "ascii")]
    Ascii,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16-le",
            TextEncoding::Utf16Be => "utf-16-be",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Ascii => "ascii",
        }
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            TextEncoding::Latin1 => self.encode_single_byte(text, 0xff),
            TextEncoding::Ascii => self.encode_single_byte(text, 0x7f),
        }
    }

    fn encode_single_byte(&self, text: &str, max: u32) -> Result<Vec<u8>> {
        text.chars()
            .map(|c| {
                u8::try_from(u32::from(c))
                    .ok()
                    .filter(|byte| u32::from(*byte) <= max)
                    .ok_or_else(|| TestDirectoryError::Encoding {
                        encoding: self.name(),
                        reason: format!("character {c:?} is out of range"),
                    })
            })
            .collect()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = TestDirectoryError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-16-le" | "utf-16le" | "utf16le" => Ok(TextEncoding::Utf16Le),
            "utf-16-be" | "utf-16be" | "utf16be" => Ok(TextEncoding::Utf16Be),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            _ => Err(TestDirectoryError::Encoding {
                encoding: "unknown",
                reason: format!("unsupported encoding name `{name}`"),
            }),
        }
    }
}
