//! Criterion request modes and the validators for user-supplied values.
//!
//! Every validator has the shape `parse(&str) -> Result<T, ValidationError>`
//! so it can be wired straight into clap as a value parser, which rejects
//! bad input before the log file or the pattern registry is touched.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Registry name consulted by `--timestamps` without a value.
pub const TIMESTAMPS_PATTERN: &str = "TIMESTAMPS";
/// Registry name consulted by `--ipv4` without a value.
pub const IPV4_PATTERN: &str = "IPV4";
/// Registry name consulted by `--ipv6` without a value.
pub const IPV6_PATTERN: &str = "IPV6";

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("valid timestamp regex"));
static PATTERN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("valid pattern name regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Negative argument '{0}' instead of a non-negative integer")]
    NegativeCount(String),

    #[error("Invalid line count '{0}': expected a non-negative integer")]
    InvalidCount(String),

    #[error("Timestamp '{0}' is not in HH:MM:SS format")]
    MalformedTimestamp(String),

    #[error("'{0}' is not a valid IPv4 address")]
    InvalidIpv4(String),

    #[error("'{0}' is not a valid IPv6 address")]
    InvalidIpv6(String),

    #[error("Invalid pattern name '{0}': expected NAME or NAME=VALUE with NAME made of word characters")]
    InvalidPatternName(String),
}

/// How a single criterion was requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Criterion {
    /// Not requested; has no effect on the output.
    #[default]
    Unset,
    /// Keep lines where the registry pattern matches anywhere.
    FlagOnly,
    /// Keep lines containing this literal.
    ValueBound(String),
}

impl Criterion {
    pub fn is_active(&self) -> bool {
        !matches!(self, Criterion::Unset)
    }
}

// clap hands optional-value flags over as Option<Option<T>>:
// None = absent, Some(None) = bare flag, Some(Some(v)) = flag with value.
impl<T: Into<String>> From<Option<Option<T>>> for Criterion {
    fn from(arg: Option<Option<T>>) -> Self {
        match arg {
            None => Criterion::Unset,
            Some(None) => Criterion::FlagOnly,
            Some(Some(value)) => Criterion::ValueBound(value.into()),
        }
    }
}

/// A criterion bound to the registry pattern it resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCriterion {
    pub name: String,
    pub criterion: Criterion,
}

impl NamedCriterion {
    pub fn new(name: impl Into<String>, criterion: Criterion) -> Self {
        Self {
            name: name.into(),
            criterion,
        }
    }
}

/// Full criteria set of one invocation, in application order.
#[derive(Debug, Clone, Default)]
pub struct CriteriaSet {
    pub timestamps: Criterion,
    pub ipv4: Criterion,
    pub ipv6: Criterion,
    pub patterns: Vec<NamedCriterion>,
}

impl CriteriaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamps(mut self, criterion: Criterion) -> Self {
        self.timestamps = criterion;
        self
    }

    pub fn with_ipv4(mut self, criterion: Criterion) -> Self {
        self.ipv4 = criterion;
        self
    }

    pub fn with_ipv6(mut self, criterion: Criterion) -> Self {
        self.ipv6 = criterion;
        self
    }

    pub fn with_pattern(mut self, named: NamedCriterion) -> Self {
        self.patterns.push(named);
        self
    }

    /// Built-ins first (timestamps, ipv4, ipv6), then named patterns in the
    /// order given. Unset criteria are dropped.
    pub fn ordered(&self) -> Vec<NamedCriterion> {
        [
            NamedCriterion::new(TIMESTAMPS_PATTERN, self.timestamps.clone()),
            NamedCriterion::new(IPV4_PATTERN, self.ipv4.clone()),
            NamedCriterion::new(IPV6_PATTERN, self.ipv6.clone()),
        ]
        .into_iter()
        .chain(self.patterns.iter().cloned())
        .filter(|named| named.criterion.is_active())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered().is_empty()
    }
}

/// Parse a `--first`/`--last` count.
pub fn parse_count(s: &str) -> Result<usize, ValidationError> {
    let trimmed = s.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(ValidationError::NegativeCount(s.to_string())),
        Ok(n) => usize::try_from(n).map_err(|_| ValidationError::InvalidCount(s.to_string())),
        Err(_) => Err(ValidationError::InvalidCount(s.to_string())),
    }
}

/// Accept a `HH:MM:SS` shaped value. Field ranges are not checked.
pub fn parse_timestamp(s: &str) -> Result<String, ValidationError> {
    if TIMESTAMP_RE.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(ValidationError::MalformedTimestamp(s.to_string()))
    }
}

/// Accept a dotted-quad IPv4 literal, returned as spelled.
pub fn parse_ipv4(s: &str) -> Result<String, ValidationError> {
    s.parse::<Ipv4Addr>()
        .map(|_| s.to_string())
        .map_err(|_| ValidationError::InvalidIpv4(s.to_string()))
}

/// Accept a standard IPv6 literal, returned as spelled.
pub fn parse_ipv6(s: &str) -> Result<String, ValidationError> {
    s.parse::<Ipv6Addr>()
        .map(|_| s.to_string())
        .map_err(|_| ValidationError::InvalidIpv6(s.to_string()))
}

/// Parse a `--pattern` argument: `NAME` or `NAME=VALUE`.
pub fn parse_named_criterion(s: &str) -> Result<NamedCriterion, ValidationError> {
    let (name, criterion) = match s.split_once('=') {
        Some((name, value)) if !value.is_empty() => {
            (name, Criterion::ValueBound(value.to_string()))
        }
        Some(_) => return Err(ValidationError::InvalidPatternName(s.to_string())),
        None => (s, Criterion::FlagOnly),
    };

    if !PATTERN_NAME_RE.is_match(name) {
        return Err(ValidationError::InvalidPatternName(s.to_string()));
    }

    Ok(NamedCriterion::new(name.to_uppercase(), criterion))
}
