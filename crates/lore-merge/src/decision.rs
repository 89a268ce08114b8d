use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MergeError;
use crate::identity::SegmentIdentity;

/// Which document a decision favours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Side {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(MergeError::InvalidSide(other.to_string())),
        }
    }
}

/// A user's accept/reject choice for one line record.
///
/// For rejections `side` is always [`Side::Left`] and carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeDecision {
    pub identity: SegmentIdentity,
    pub side: Side,
    pub accepted: bool,
}

impl MergeDecision {
    pub fn accept(identity: SegmentIdentity, side: Side) -> Self {
        Self {
            identity,
            side,
            accepted: true,
        }
    }

    pub fn reject(identity: SegmentIdentity) -> Self {
        Self {
            identity,
            side: Side::Left,
            accepted: false,
        }
    }

    /// `true` when the decision accepts exactly `side`.
    pub fn accepts(&self, side: Side) -> bool {
        self.accepted && self.side == side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_diff::DiffType;

    #[test]
    fn reject_uses_left_placeholder() {
        let d = MergeDecision::reject(SegmentIdentity::new(1, DiffType::Added));
        assert_eq!(d.side, Side::Left);
        assert!(!d.accepted);
        assert!(!d.accepts(Side::Left));
    }

    #[test]
    fn accepts_checks_side() {
        let d = MergeDecision::accept(SegmentIdentity::new(1, DiffType::Modified), Side::Right);
        assert!(d.accepts(Side::Right));
        assert!(!d.accepts(Side::Left));
    }

    #[test]
    fn side_parses_lowercase() {
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("right".parse::<Side>().unwrap(), Side::Right);
        assert!(matches!("up".parse::<Side>(), Err(MergeError::InvalidSide(_))));
    }

    #[test]
    fn decision_json_shape() {
        let d = MergeDecision::accept(SegmentIdentity::new(3, DiffType::Modified), Side::Right);
        let json = serde_json::to_value(d).unwrap();
        assert_eq!(json["identity"], "3-modified");
        assert_eq!(json["side"], "right");
        assert_eq!(json["accepted"], true);
    }
}
