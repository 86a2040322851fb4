use std::fs;
use std::path::Path;

/// One source line, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based position in the source file
    pub line_number: usize,
    pub text: String,
}

impl Line {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    /// Length of the trailing `\n` / `\r\n`, if any.
    fn terminator_len(&self) -> usize {
        if self.text.ends_with("\r\n") {
            2
        } else if self.text.ends_with('\n') {
            1
        } else {
            0
        }
    }

    /// Line text without its terminator.
    pub fn content(&self) -> &str {
        &self.text[..self.text.len() - self.terminator_len()]
    }

    /// The original terminator (possibly empty for a final unterminated line).
    pub fn terminator(&self) -> &str {
        &self.text[self.text.len() - self.terminator_len()..]
    }

    /// Replace the content while keeping the terminator.
    pub fn with_content(self, content: String) -> Self {
        let mut text = content;
        text.push_str(self.terminator());
        Self {
            line_number: self.line_number,
            text,
        }
    }
}

/// Split text into lines, each keeping its own terminator.
pub fn split_lines(content: &str) -> Vec<Line> {
    content
        .split_inclusive('\n')
        .enumerate()
        .map(|(idx, text)| Line::new(idx + 1, text))
        .collect()
}

/// Read a whole log file into memory.
pub fn read_log_file(path: impl AsRef<Path>) -> std::io::Result<Vec<Line>> {
    let content = fs::read_to_string(path)?;
    Ok(split_lines(&content))
}
