use std::fmt;

use glob::{MatchOptions, Pattern};
use serde::Serialize;

const OUTPUT_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Buffered text captured from one output stream of a finished command.
///
/// ```rust
/// # use testdirectory::CheckOutput;
/// let output = CheckOutput::new("Python 3.12.1\n");
/// assert!(output.matches("Python *"));
/// assert!(!output.matches("python *"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckOutput {
    output: String,
}

impl CheckOutput {
    pub fn new(output: impl Into<String>) -> Self {
        CheckOutput {
            output: output.into(),
        }
    }

    /// Decodes raw stream bytes, replacing invalid UTF-8 and folding
    /// `\r\n` and `\r` line endings into `\n`.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let output = if text.contains('\r') {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text.into_owned()
        };
        CheckOutput { output }
    }

    /// Matches the whole captured text against a shell-style pattern.
    ///
    /// `*` matches any sequence of characters (newlines included), `?` any
    /// single character. The comparison is case-sensitive. A pattern which is
    /// not a valid glob is compared literally.
    pub fn matches(&self, pattern: &str) -> bool {
        let pattern = Pattern::new(pattern)
            .or_else(|_| Pattern::new(&Pattern::escape(pattern)));

        match pattern {
            Ok(pattern) => pattern.matches_with(&self.output, OUTPUT_MATCH_OPTIONS),
            Err(_) => false,
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output.contains(needle)
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

impl fmt::Display for CheckOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output)
    }
}

impl AsRef<str> for CheckOutput {
    fn as_ref(&self) -> &str {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_spans_lines_and_separators() {
        let output = CheckOutput::new("building /tmp/x\nlinking\ndone\n");
        assert!(output.matches("*linking*"));
        assert!(output.matches("building /tmp/*done?"));
    }

    #[test]
    fn match_is_anchored_on_both_ends() {
        let output = CheckOutput::new("hello world");
        assert!(output.matches("hello world"));
        assert!(!output.matches("hello"));
        assert!(!output.matches("world"));
        assert!(output.matches("*world"));
    }

    #[test]
    fn question_mark_matches_single_character() {
        let output = CheckOutput::new("v1.2");
        assert!(output.matches("v?.?"));
        assert!(!output.matches("v?"));
    }

    #[test]
    fn invalid_pattern_falls_back_to_literal() {
        let output = CheckOutput::new("array[0");
        assert!(output.matches("array[0"));
        assert!(!output.matches("array[1"));
    }

    #[test]
    fn carriage_returns_are_normalized() {
        let output = CheckOutput::from_bytes(b"one\r\ntwo\rthree\n");
        assert_eq!(output.as_str(), "one\ntwo\nthree\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let output = CheckOutput::from_bytes(&[b'o', b'k', 0xff]);
        assert!(output.matches("ok*"));
        assert!(output.contains("ok"));
    }
}
