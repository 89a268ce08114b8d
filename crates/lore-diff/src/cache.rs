//! Single-entry memo for diff results.
//!
//! Keyed by the BLAKE3 digests of both documents plus the options used, so a
//! recompute only happens when either text (or the options) actually changes.

use std::sync::Arc;

use tracing::debug;

use crate::line_diff::diff_lines_with;
use crate::options::DiffOptions;
use crate::types::DiffResult;

/// Identity of one diff computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiffKey {
    left: [u8; 32],
    right: [u8; 32],
    options: DiffOptions,
}

impl DiffKey {
    pub fn new(left: &str, right: &str, options: &DiffOptions) -> Self {
        Self {
            left: *blake3::hash(left.as_bytes()).as_bytes(),
            right: *blake3::hash(right.as_bytes()).as_bytes(),
            options: *options,
        }
    }

    /// Short hex form of both digests, for logs.
    pub fn short_hex(&self) -> String {
        format!("{}:{}", hex::encode(&self.left[..4]), hex::encode(&self.right[..4]))
    }
}

/// Memoises the most recent [`DiffResult`].
#[derive(Debug, Default)]
pub struct DiffCache {
    entry: Option<(DiffKey, Arc<DiffResult>)>,
    hits: u64,
    misses: u64,
}

impl DiffCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for these inputs, computing it on a miss.
    pub fn get_or_compute(&mut self, left: &str, right: &str, options: &DiffOptions) -> Arc<DiffResult> {
        let key = DiffKey::new(left, right, options);
        if let Some((cached, result)) = &self.entry {
            if *cached == key {
                self.hits += 1;
                debug!(key = %key.short_hex(), "diff cache hit");
                return Arc::clone(result);
            }
        }

        self.misses += 1;
        debug!(key = %key.short_hex(), "diff cache miss");
        let result = Arc::new(diff_lines_with(left, right, options));
        self.entry = Some((key, Arc::clone(&result)));
        result
    }

    /// Drop the cached entry.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
