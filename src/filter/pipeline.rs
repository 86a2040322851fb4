use super::error::FilterError;
use super::highlight::{HighlightKind, Highlighter};
use crate::criteria::{CriteriaSet, Criterion, NamedCriterion};
use crate::input::Line;
use crate::registry::PatternRegistry;
use regex::Regex;
use std::ops::Range;

/// How a single step decides whether a line matches
#[derive(Debug, Clone)]
pub enum LineMatcher {
    /// Registry regex, searched anywhere in the line
    Pattern(Regex),
    /// Plain substring containment
    Literal(String),
}

impl LineMatcher {
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            LineMatcher::Pattern(re) => re.is_match(text),
            LineMatcher::Literal(value) => text.contains(value.as_str()),
        }
    }

    /// Non-overlapping match spans, left to right.
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            LineMatcher::Pattern(re) => re.find_iter(text).map(|m| m.range()).collect(),
            LineMatcher::Literal(value) => text
                .match_indices(value.as_str())
                .map(|(start, matched)| start..start + matched.len())
                .collect(),
        }
    }

    pub fn highlight_kind(&self) -> HighlightKind {
        match self {
            LineMatcher::Pattern(_) => HighlightKind::Pattern,
            LineMatcher::Literal(_) => HighlightKind::Value,
        }
    }
}

/// One resolved criterion
#[derive(Debug, Clone)]
pub struct FilterStep {
    pub name: String,
    pub matcher: LineMatcher,
}

impl FilterStep {
    /// Resolve a criterion against the registry. Returns `None` for unset ones.
    pub fn resolve(
        registry: &PatternRegistry,
        named: &NamedCriterion,
    ) -> Result<Option<Self>, FilterError> {
        let name = named.name.to_uppercase();
        if !named.criterion.is_active() {
            return Ok(None);
        }
        let body = registry
            .get(&name)
            .ok_or_else(|| FilterError::UndefinedPattern(name.clone()))?;

        let matcher = match &named.criterion {
            Criterion::Unset => return Ok(None),
            Criterion::FlagOnly => {
                let re = Regex::new(body).map_err(|source| FilterError::InvalidRegex {
                    name: name.clone(),
                    source,
                })?;
                LineMatcher::Pattern(re)
            }
            Criterion::ValueBound(value) => LineMatcher::Literal(value.clone()),
        };

        Ok(Some(FilterStep { name, matcher }))
    }

    /// Keep matching lines and highlight their spans.
    pub fn apply(&self, lines: Vec<Line>, highlighter: &Highlighter) -> Vec<Line> {
        let kind = self.matcher.highlight_kind();
        lines
            .into_iter()
            .filter(|line| self.matcher.is_match(line.content()))
            .map(|line| {
                let content = line.content();
                let highlighted =
                    highlighter.wrap_spans(content, self.matcher.spans(content), kind);
                line.with_content(highlighted)
            })
            .collect()
    }
}

/// Ordered, fully resolved set of filter steps.
///
/// Steps run one after another on the survivors of the previous step, so the
/// result is the AND of all criteria and highlighting accumulates.
#[derive(Debug, Clone, Default)]
pub struct FilterPlan {
    steps: Vec<FilterStep>,
}

impl FilterPlan {
    /// Resolve every active criterion up front. Fails before any line is
    /// filtered if a name is undefined or its regex does not compile.
    pub fn build(registry: &PatternRegistry, criteria: &CriteriaSet) -> Result<Self, FilterError> {
        Self::from_named(registry, &criteria.ordered())
    }

    pub fn from_named(
        registry: &PatternRegistry,
        criteria: &[NamedCriterion],
    ) -> Result<Self, FilterError> {
        let mut steps = Vec::with_capacity(criteria.len());
        for named in criteria {
            if let Some(step) = FilterStep::resolve(registry, named)? {
                steps.push(step);
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[FilterStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn apply(&self, lines: Vec<Line>, highlighter: &Highlighter) -> Vec<Line> {
        let mut lines = lines;
        for step in &self.steps {
            let before = lines.len();
            lines = step.apply(lines, highlighter);
            tracing::debug!(
                criterion = %step.name,
                before,
                after = lines.len(),
                "applied filter step"
            );
        }
        lines
    }
}
