use crate::input::Line;
use crate::registry::PatternRegistry;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    line_number: usize,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    file: String,
    matches: usize,
    lines: Vec<JsonLine<'a>>,
}

/// Concatenate lines exactly as read, terminators included.
pub fn render_text(lines: &[Line]) -> String {
    lines.iter().map(|line| line.text.as_str()).collect()
}

/// JSON report of the selected lines, terminators stripped.
pub fn render_json(file: &Path, lines: &[Line]) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        file: file.display().to_string(),
        matches: lines.len(),
        lines: lines
            .iter()
            .map(|line| JsonLine {
                line_number: line.line_number,
                text: line.content(),
            })
            .collect(),
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

/// Table of the loaded patterns, in file order.
pub fn render_pattern_table(registry: &PatternRegistry) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Name"), Cell::new("Pattern")]);

    for entry in registry.entries() {
        table.add_row(vec![Cell::new(&entry.name), Cell::new(&entry.body)]);
    }

    format!("{table}\n")
}

pub fn write_stdout(content: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()
}

pub fn write_output_file(path: &Path, content: &str) -> io::Result<()> {
    std::fs::write(path, content)
}
