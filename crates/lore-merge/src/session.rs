//! A single-user merge session over two documents.
//!
//! The session owns the left (base) and right (candidate) texts, a draft
//! buffer, the decision store, and a memoised diff. Diffs and merges are
//! recomputed from the current texts on demand.
//!
//! Outline edits (structural lorebook edits such as removing an entry) are
//! tracked against the base document as it was loaded: the first edit starts
//! from that base, later edits build on the right text, and while edits are
//! pending the diff compares against the loaded base rather than the current
//! left text.

use std::sync::Arc;

use lore_diff::{DiffCache, DiffOptions, DiffResult};
use tracing::debug;

use crate::builder::build_merged;
use crate::decision::{MergeDecision, Side};
use crate::identity::SegmentIdentity;
use crate::store::DecisionStore;

#[derive(Debug, Default)]
pub struct MergeSession {
    left: String,
    right: String,
    draft: String,
    original_base: String,
    has_outline_edits: bool,
    decisions: DecisionStore,
    cache: DiffCache,
    options: DiffOptions,
}

impl MergeSession {
    pub fn new(options: DiffOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// The base document outline edits are measured against.
    pub fn original_base(&self) -> &str {
        &self.original_base
    }

    pub fn has_outline_edits(&self) -> bool {
        self.has_outline_edits
    }

    // ---- Documents ----

    /// Load a new base document.
    ///
    /// Decisions and outline-edit tracking are cleared, the draft and the
    /// tracked base are reset to the new text, and the right side mirrors it
    /// when it is empty or only held outline edits.
    pub fn load_left(&mut self, text: impl Into<String>) {
        self.left = text.into();
        self.original_base = self.left.clone();
        self.draft = self.left.clone();
        if self.right.is_empty() || self.has_outline_edits {
            self.right = self.left.clone();
        }
        self.has_outline_edits = false;
        self.decisions.clear();
        debug!(bytes = self.left.len(), "loaded left document");
    }

    /// Load a new candidate document. Decisions are cleared.
    pub fn load_right(&mut self, text: impl Into<String>) {
        self.right = text.into();
        self.decisions.clear();
        debug!(bytes = self.right.len(), "loaded right document");
    }

    /// Replace the left text in place. Decisions are kept.
    pub fn edit_left(&mut self, text: impl Into<String>) {
        self.left = text.into();
    }

    /// Replace the right text in place. Decisions are kept.
    pub fn edit_right(&mut self, text: impl Into<String>) {
        self.right = text.into();
    }

    /// Apply a fallible structural edit and store the result as the right text.
    ///
    /// The first edit reads the tracked base (the left text when no base was
    /// loaded); later edits read the right text. On success the left text is
    /// reset to the base so the diff shows exactly the outline edits. On
    /// error nothing changes.
    pub fn apply_outline_edit<F, E>(&mut self, edit: F) -> Result<(), E>
    where
        F: FnOnce(&str) -> Result<String, E>,
    {
        let base = if self.original_base.is_empty() {
            self.left.clone()
        } else {
            self.original_base.clone()
        };
        let source = if self.has_outline_edits { self.right.as_str() } else { base.as_str() };
        let updated = edit(source)?;

        self.left = base.clone();
        self.original_base = base;
        self.right = updated;
        self.has_outline_edits = true;
        debug!(bytes = self.right.len(), "applied outline edit");
        Ok(())
    }

    // ---- Diff and merge ----

    /// The current diff, or `None` when both compared documents are empty.
    ///
    /// While outline edits are pending the left side of the comparison is
    /// the tracked base, not the current left text.
    pub fn diff(&mut self) -> Option<Arc<DiffResult>> {
        let left = if self.has_outline_edits && !self.original_base.is_empty() {
            &self.original_base
        } else {
            &self.left
        };
        if left.is_empty() && self.right.is_empty() {
            return None;
        }
        Some(self.cache.get_or_compute(left, &self.right, &self.options))
    }

    /// The merged text under the current decisions; empty when there is no diff.
    pub fn merged(&mut self) -> String {
        match self.diff() {
            Some(diff) => build_merged(&diff, &self.decisions),
            None => String::new(),
        }
    }

    // ---- Decisions ----

    pub fn accept(&mut self, identity: SegmentIdentity, side: Side) {
        debug!(%identity, %side, "accept");
        self.decisions.accept(identity, side);
    }

    pub fn reject(&mut self, identity: SegmentIdentity) {
        debug!(%identity, "reject");
        self.decisions.reject(identity);
    }

    pub fn reset_decisions(&mut self) {
        self.decisions.clear();
    }

    pub fn decision(&self, identity: &SegmentIdentity) -> Option<&MergeDecision> {
        self.decisions.get(identity)
    }

    pub fn decisions(&self) -> &DecisionStore {
        &self.decisions
    }

    /// Replace the whole decision set, e.g. from a decision file.
    pub fn set_decisions(&mut self, decisions: DecisionStore) {
        self.decisions = decisions;
    }

    // ---- Apply and draft ----

    /// Overwrite the left document with the merged text and end outline-edit
    /// tracking. No-op when the merge is empty.
    pub fn apply_to_left(&mut self) -> bool {
        let merged = self.merged();
        if merged.is_empty() {
            return false;
        }
        self.left = merged;
        self.has_outline_edits = false;
        true
    }

    /// Overwrite the right document with the merged text and end outline-edit
    /// tracking. No-op when the merge is empty.
    pub fn apply_to_right(&mut self) -> bool {
        let merged = self.merged();
        if merged.is_empty() {
            return false;
        }
        self.right = merged;
        self.has_outline_edits = false;
        true
    }

    pub fn save_left_to_draft(&mut self) {
        self.draft = self.left.clone();
    }

    pub fn save_right_to_draft(&mut self) {
        self.draft = self.right.clone();
    }

    pub fn copy_draft_to_left(&mut self) -> bool {
        if self.draft.is_empty() {
            return false;
        }
        self.left = self.draft.clone();
        true
    }

    pub fn copy_draft_to_right(&mut self) -> bool {
        if self.draft.is_empty() {
            return false;
        }
        self.right = self.draft.clone();
        true
    }
}
