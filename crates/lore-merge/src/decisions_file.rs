//! JSON persistence for decision sets.
//!
//! A decision file is a JSON array of decisions:
//! `[{"identity":"3-modified","side":"right","accepted":true}]`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::decision::MergeDecision;
use crate::error::{MergeError, Result};
use crate::store::DecisionStore;

/// Parse a decision array. Later entries for the same identity win.
pub fn decisions_from_json(json: &str) -> Result<DecisionStore> {
    let decisions: Vec<MergeDecision> =
        serde_json::from_str(json).map_err(|e| MergeError::Serialization(e.to_string()))?;
    Ok(decisions.into_iter().collect())
}

/// Serialize a store as a pretty-printed decision array.
pub fn decisions_to_json(store: &DecisionStore) -> Result<String> {
    let decisions: Vec<&MergeDecision> = store.iter().collect();
    serde_json::to_string_pretty(&decisions).map_err(|e| MergeError::Serialization(e.to_string()))
}

pub fn load_decisions(path: &Path) -> Result<DecisionStore> {
    let json = fs::read_to_string(path)?;
    let store = decisions_from_json(&json)?;
    debug!(path = %path.display(), count = store.len(), "loaded decisions");
    Ok(store)
}

pub fn save_decisions(path: &Path, store: &DecisionStore) -> Result<()> {
    fs::write(path, decisions_to_json(store)?)?;
    debug!(path = %path.display(), count = store.len(), "saved decisions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Side;
    use crate::identity::SegmentIdentity;
    use lore_diff::DiffType;

    #[test]
    fn parse_decision_array() {
        let json = r#"[
            {"identity": "2-modified", "side": "right", "accepted": true},
            {"identity": "4-added", "side": "left", "accepted": false}
        ]"#;
        let store = decisions_from_json(json).unwrap();
        assert_eq!(store.len(), 2);
        let modified = store.get(&SegmentIdentity::new(2, DiffType::Modified)).unwrap();
        assert!(modified.accepts(Side::Right));
    }

    #[test]
    fn later_entries_overwrite_earlier() {
        let json = r#"[
            {"identity": "1-removed", "side": "left", "accepted": true},
            {"identity": "1-removed", "side": "left", "accepted": false}
        ]"#;
        let store = decisions_from_json(json).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.get(&SegmentIdentity::new(1, DiffType::Removed)).unwrap().accepted);
    }

    #[test]
    fn bad_identity_is_a_serialization_error() {
        let json = r#"[{"identity": "one-added", "side": "left", "accepted": true}]"#;
        assert!(matches!(decisions_from_json(json), Err(MergeError::Serialization(_))));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.json");

        let mut store = DecisionStore::new();
        store.accept(SegmentIdentity::new(3, DiffType::Modified), Side::Right);
        store.reject(SegmentIdentity::new(5, DiffType::Added));
        save_decisions(&path, &store).unwrap();

        let loaded = load_decisions(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_decisions(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(MergeError::Io(_))));
    }
}
