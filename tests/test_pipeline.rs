use logsift::criteria::{CriteriaSet, Criterion, NamedCriterion};
use logsift::filter::{FilterPlan, Highlighter, strip_markup, window};
use logsift::input::{Line, read_log_file};
use logsift::registry::PatternRegistry;
use std::path::Path;

fn fixture_lines() -> Vec<Line> {
    read_log_file(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/test_sample.log"))
        .expect("fixture should be readable")
}

fn registry() -> PatternRegistry {
    PatternRegistry::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("patterns.txt"))
        .expect("shipped patterns should parse")
}

fn numbers(lines: &[Line]) -> Vec<usize> {
    lines.iter().map(|line| line.line_number).collect()
}

fn run(criteria: &CriteriaSet, highlighter: Highlighter) -> Vec<Line> {
    FilterPlan::build(&registry(), criteria)
        .expect("plan should build")
        .apply(fixture_lines(), &highlighter)
}

#[test]
fn test_shipped_patterns_cover_builtins() {
    let registry = registry();
    for name in ["timestamps", "ipv4", "ipv6"] {
        assert!(registry.contains(name), "missing {name}");
    }
}

#[test]
fn test_and_is_commutative_for_flags() {
    let a = run(
        &CriteriaSet::new()
            .with_timestamps(Criterion::FlagOnly)
            .with_pattern(NamedCriterion::new("HTTP_METHOD", Criterion::FlagOnly))
            .with_ipv4(Criterion::FlagOnly),
        Highlighter::new(true),
    );
    let named_first = [
        NamedCriterion::new("HTTP_METHOD", Criterion::FlagOnly),
        NamedCriterion::new("IPV4", Criterion::FlagOnly),
        NamedCriterion::new("TIMESTAMPS", Criterion::FlagOnly),
    ];
    let b = FilterPlan::from_named(&registry(), &named_first)
        .expect("plan should build")
        .apply(fixture_lines(), &Highlighter::new(true));

    assert_eq!(numbers(&a), vec![2, 3, 5, 7, 12, 15]);
    assert_eq!(numbers(&a), numbers(&b));
}

#[test]
fn test_highlighting_never_changes_which_lines_survive() {
    let criteria = CriteriaSet::new()
        .with_ipv4(Criterion::ValueBound("66.249.73.135".to_string()))
        .with_timestamps(Criterion::FlagOnly);

    let colored = run(&criteria, Highlighter::new(true));
    let plain = run(&criteria, Highlighter::plain());

    assert_eq!(numbers(&colored), vec![7, 11, 12]);
    assert_eq!(numbers(&colored), numbers(&plain));
    for (c, p) in colored.iter().zip(&plain) {
        assert_eq!(strip_markup(&c.text), p.text);
    }
}

#[test]
fn test_empty_criteria_then_window() {
    let all = run(&CriteriaSet::new(), Highlighter::new(true));
    assert_eq!(all, fixture_lines());
    assert_eq!(numbers(window(&all, Some(10), Some(10))), vec![6, 7, 8, 9, 10]);
    assert_eq!(numbers(window(&all, Some(4), None)), vec![1, 2, 3, 4]);
}

#[test]
fn test_window_applies_after_filtering() {
    let ipv4 = run(
        &CriteriaSet::new().with_ipv4(Criterion::FlagOnly),
        Highlighter::plain(),
    );
    assert_eq!(numbers(window(&ipv4, None, Some(3))), vec![12, 14, 15]);
    assert_eq!(numbers(window(&ipv4, Some(2), None)), vec![1, 2]);
}
