//! Merge engine for lorebook documents.
//!
//! Records per-line accept/reject decisions keyed by a derived identity and
//! deterministically rebuilds a merged document from a diff plus those
//! decisions.
//!
//! # Key Types
//!
//! - [`SegmentIdentity`] -- `(line_number, diff_type)` key of a decision
//! - [`MergeDecision`] / [`Side`] -- One accept/reject choice
//! - [`DecisionStore`] -- Copy-on-write identity to decision map
//! - [`MergeSession`] -- Two documents, a draft, decisions, and a memoised diff

pub mod builder;
pub mod decision;
pub mod decisions_file;
pub mod error;
pub mod identity;
pub mod session;
pub mod store;

pub use builder::{build_merged, resolve_line};
pub use decision::{MergeDecision, Side};
pub use decisions_file::{decisions_from_json, decisions_to_json, load_decisions, save_decisions};
pub use error::{MergeError, Result};
pub use identity::SegmentIdentity;
pub use session::MergeSession;
pub use store::DecisionStore;
