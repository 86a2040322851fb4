use std::ops::Range;

/// Index range kept by a first/last window over `len` items.
///
/// `first` caps the end, `last` raises the start. A count of zero leaves its
/// side of the window open. With both set the result is the intersection of
/// the two windows, which is empty when `len - last >= first`.
pub fn window_bounds(len: usize, first: Option<usize>, last: Option<usize>) -> Range<usize> {
    let end = first
        .filter(|&first| first > 0)
        .map_or(len, |first| first.min(len));
    let start = last
        .filter(|&last| last > 0)
        .map_or(0, |last| len.saturating_sub(last));
    if start >= end { start..start } else { start..end }
}

/// Apply the first/last window to an already filtered list.
pub fn window<T>(items: &[T], first: Option<usize>, last: Option<usize>) -> &[T] {
    &items[window_bounds(items.len(), first, last)]
}
