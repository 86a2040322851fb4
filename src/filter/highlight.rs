use colored::Color;
use std::ops::Range;

/// Which kind of match a highlight span marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// A registry regex matched (flag-only criterion).
    Pattern,
    /// A user-supplied literal matched (value-bound criterion).
    Value,
}

/// Wraps matched spans of a line in ANSI colour markup.
///
/// A disabled highlighter leaves text untouched, so filtering results are the
/// same whether or not colour is on.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    enabled: bool,
    pattern_color: Color,
    value_color: Color,
}

impl Highlighter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pattern_color: Color::Blue,
            value_color: Color::Red,
        }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn color_for(&self, kind: HighlightKind) -> Color {
        match kind {
            HighlightKind::Pattern => self.pattern_color,
            HighlightKind::Value => self.value_color,
        }
    }

    /// Render a single span.
    pub fn paint(&self, text: &str, kind: HighlightKind) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        format!(
            "\x1b[{}m{}\x1b[0m",
            self.color_for(kind).to_fg_str(),
            text
        )
    }

    /// Rebuild `text` with every span wrapped.
    ///
    /// Spans must be sorted and non-overlapping, as produced by
    /// `Regex::find_iter` or `str::match_indices`.
    pub fn wrap_spans<I>(&self, text: &str, spans: I, kind: HighlightKind) -> String
    where
        I: IntoIterator<Item = Range<usize>>,
    {
        if !self.enabled {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + 16);
        let mut cursor = 0;
        for span in spans {
            if span.is_empty() {
                continue;
            }
            out.push_str(&text[cursor..span.start]);
            out.push_str(&self.paint(&text[span.clone()], kind));
            cursor = span.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

/// Remove ANSI SGR sequences, e.g. to compare highlighted output with source text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
