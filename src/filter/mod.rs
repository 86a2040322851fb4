//! Line filtering, highlighting and windowing
//!
//! Lines flow through three stages:
//!
//! ```text
//! lines ──> FilterPlan (one step per active criterion, AND-ed) ──> window(first, last)
//! ```
//!
//! # Criteria
//!
//! - flag-only (`--ipv4`): keep lines where the registry regex matches,
//!   highlight every match in blue
//! - value-bound (`--ipv4 66.249.73.135`): keep lines containing the literal,
//!   highlight every occurrence in red
//!
//! Each step sees the text left by the previous one, markup included.
//!
//! # Window
//!
//! ```text
//! first=N          [0, min(N, n))
//! last=M           [max(0, n-M), n)
//! first=N last=M   [max(0, n-M), min(N, n))    intersection, may be empty
//! ```

pub mod error;
pub mod highlight;
pub mod pipeline;
pub mod window;

pub use error::FilterError;
pub use highlight::{HighlightKind, Highlighter, strip_markup};
pub use pipeline::{FilterPlan, FilterStep, LineMatcher};
pub use window::{window, window_bounds};
