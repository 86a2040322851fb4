use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Pattern file looked up in the working directory when `--patterns` is not given.
pub const DEFAULT_PATTERNS_FILE: &str = "patterns.txt";

static PATTERN_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\s+(.+)$").expect("valid pattern line regex"));

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read pattern file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse a pattern from line {line_number} of '{path}': {content:?}")]
    Parse {
        path: String,
        line_number: usize,
        content: String,
    },
}

/// A single `NAME regex-body` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub name: String,
    pub body: String,
}

/// Name to regex-body mapping loaded from a pattern file.
///
/// Names are stored upper-cased and looked up case-insensitively. A name that
/// appears more than once keeps its first position but takes the last body.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
    index: HashMap<String, usize>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and parse a pattern file. Any malformed line, blank ones included,
    /// fails the whole load.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let path_display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path_display.clone(),
            source,
        })?;

        let registry = Self::parse_named(&raw, &path_display)?;
        tracing::debug!(
            path = %path_display,
            patterns = registry.len(),
            "loaded pattern registry"
        );
        Ok(registry)
    }

    /// Parse pattern definitions from an in-memory string.
    pub fn parse(content: &str) -> Result<Self, RegistryError> {
        Self::parse_named(content, "<memory>")
    }

    pub fn from_entries<N, B>(entries: impl IntoIterator<Item = (N, B)>) -> Self
    where
        N: Into<String>,
        B: Into<String>,
    {
        let mut registry = Self::new();
        for (name, body) in entries {
            registry.insert(name.into(), body.into());
        }
        registry
    }

    fn parse_named(content: &str, source: &str) -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');

            let (name, body) = parse_pattern_line(line).ok_or_else(|| RegistryError::Parse {
                path: source.to_string(),
                line_number: idx + 1,
                content: line.to_string(),
            })?;

            if registry.contains(name) {
                tracing::debug!(name, "pattern redefined, last definition wins");
            }
            registry.insert(name.to_string(), body.to_string());
        }

        Ok(registry)
    }

    fn insert(&mut self, name: String, body: String) {
        let name = name.to_uppercase();
        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].body = body,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(PatternEntry { name, body });
            }
        }
    }

    /// Regex body registered under `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(&name.to_uppercase())
            .map(|&pos| self.entries[pos].body.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_uppercase())
    }

    /// Entries in the order their names first appeared.
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a line into its leading word token and the rest of the line.
fn parse_pattern_line(line: &str) -> Option<(&str, &str)> {
    let caps = PATTERN_LINE_RE.captures(line)?;
    let name = caps.get(1)?.as_str();
    let body = caps.get(2)?.as_str();
    (!body.trim().is_empty()).then_some((name, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_and_body() {
        let registry = PatternRegistry::parse("TIMESTAMPS \\d{2}:\\d{2}:\\d{2}\n").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("TIMESTAMPS"), Some("\\d{2}:\\d{2}:\\d{2}"));
    }

    #[test]
    fn test_body_keeps_embedded_whitespace() {
        let registry = PatternRegistry::parse("GREETING hello   big world\n").unwrap();
        assert_eq!(registry.get("greeting"), Some("hello   big world"));
    }

    #[test]
    fn test_whitespace_run_after_name_is_skipped() {
        let registry = PatternRegistry::parse("LEVEL \t  (?:INFO|WARN)\r\n").unwrap();
        assert_eq!(registry.get("LEVEL"), Some("(?:INFO|WARN)"));
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let registry = PatternRegistry::parse("ipv4 \\d+\\.\\d+\n").unwrap();
        assert!(registry.contains("IPV4"));
        assert!(registry.contains("Ipv4"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["IPV4"]);
    }

    #[test]
    fn test_last_definition_wins() {
        let registry = PatternRegistry::parse("A first\nB other\na second\n").unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("A"), Some("second"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_missing_body_is_a_parse_error() {
        let err = PatternRegistry::parse("GOOD x+\nLONELY\n").unwrap_err();
        match err {
            RegistryError::Parse {
                line_number,
                content,
                ..
            } => {
                assert_eq!(line_number, 2);
                assert_eq!(content, "LONELY");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_name_is_a_parse_error() {
        assert!(PatternRegistry::parse("   ---\n").is_err());
    }

    #[test]
    fn test_blank_line_is_a_parse_error() {
        let err = PatternRegistry::parse("A a+\n\nB b+\n").unwrap_err();
        assert!(matches!(err, RegistryError::Parse { line_number: 2, .. }));
        assert!(PatternRegistry::parse("A a+\n   \n").is_err());
    }

    #[test]
    fn test_trailing_newline_is_not_a_line() {
        let registry = PatternRegistry::parse("A a+\nB b+\n").unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = PatternRegistry::load(Path::new("/definitely/not/here/patterns.txt"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Read { .. }));
    }
}
