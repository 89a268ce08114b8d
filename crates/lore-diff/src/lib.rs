//! Line and word diff engine for lorebook documents.
//!
//! Computes a line-oriented diff between two text documents, folds adjacent
//! removed/added lines into modifications, and enriches every changed line
//! with word-level segments for highlighting.
//!
//! # Key Types
//!
//! - [`DiffResult`] / [`LineRecord`] -- Classified lines plus aggregate counters
//! - [`ChangeSegment`] -- Intra-line change span with 1-based columns
//! - [`DiffOptions`] -- Algorithm selection
//! - [`DiffCache`] -- Memoised diff keyed by document digests

pub mod cache;
pub mod collapse;
pub mod line_diff;
pub mod options;
pub mod types;
pub mod word;

pub use cache::{DiffCache, DiffKey};
pub use collapse::collapse_modifications;
pub use line_diff::{diff_lines, diff_lines_with, raw_line_records, split_lines};
pub use options::{DiffAlgorithm, DiffOptions};
pub use types::{ChangeSegment, DiffResult, DiffType, LineRecord};
pub use word::word_segments;
