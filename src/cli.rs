use crate::criteria::{
    CriteriaSet, Criterion, NamedCriterion, parse_count, parse_ipv4, parse_ipv6,
    parse_named_criterion, parse_timestamp,
};
use crate::registry::DEFAULT_PATTERNS_FILE;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Filter a log file by timestamps, IP addresses or named regex patterns,
/// highlighting what matched
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File name of entry log file
    pub file: PathBuf,

    /// Print first NUM lines of the filtered result
    #[arg(short, long, value_name = "NUM", value_parser = parse_count, allow_negative_numbers = true)]
    pub first: Option<usize>,

    /// Print last NUM lines of the filtered result
    #[arg(short, long, value_name = "NUM", value_parser = parse_count, allow_negative_numbers = true)]
    pub last: Option<usize>,

    /// Print lines that contain a timestamp in HH:MM:SS format, or the given timestamp
    #[arg(short, long, value_name = "HH:MM:SS", value_parser = parse_timestamp)]
    pub timestamps: Option<Option<String>>,

    /// Print lines that contain an IPv4 address, or the given one; matches are highlighted
    #[arg(short = 'i', long, value_name = "ADDR", value_parser = parse_ipv4)]
    pub ipv4: Option<Option<String>>,

    /// Print lines that contain an IPv6 address (standard notation), or the given one
    #[arg(short = 'I', long, value_name = "ADDR", value_parser = parse_ipv6)]
    pub ipv6: Option<Option<String>>,

    /// Additional pattern from the pattern file, as NAME or NAME=VALUE (repeatable)
    #[arg(short = 'p', long = "pattern", value_name = "NAME[=VALUE]", value_parser = parse_named_criterion)]
    pub patterns: Vec<NamedCriterion>,

    /// Pattern definitions file, one `NAME regex` per line
    #[arg(
        short = 'P',
        long = "pattern-file",
        value_name = "PATH",
        env = "LOGSIFT_PATTERN_FILE",
        default_value = DEFAULT_PATTERNS_FILE
    )]
    pub pattern_file: PathBuf,

    /// Highlight matches: auto, always, never
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Output format: text, json
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the output to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// List the loaded patterns and exit
    #[arg(long)]
    pub list_patterns: bool,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Colour when the terminal supports it
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Matching lines, byte for byte, with inline highlighting
    Text,
    /// JSON document with line numbers, no highlighting
    Json,
}

impl Cli {
    /// Criteria in application order: timestamps, ipv4, ipv6, then `--pattern`s.
    pub fn criteria(&self) -> CriteriaSet {
        self.patterns.iter().cloned().fold(
            CriteriaSet::new()
                .with_timestamps(Criterion::from(self.timestamps.clone()))
                .with_ipv4(Criterion::from(self.ipv4.clone()))
                .with_ipv6(Criterion::from(self.ipv6.clone())),
            CriteriaSet::with_pattern,
        )
    }

    /// Whether highlight markup should be emitted.
    pub fn highlight_enabled(&self) -> bool {
        if self.format == OutputFormat::Json {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
