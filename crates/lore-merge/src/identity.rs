use std::fmt;
use std::str::FromStr;

use lore_diff::{DiffType, LineRecord};
use serde::{Deserialize, Serialize};

use crate::error::MergeError;

/// Key under which a merge decision is stored: `(line_number, diff_type)`.
///
/// Only stable for the lifetime of one diff. If an edit shifts line numbers,
/// a stored decision applies to whatever record now sits at the same
/// position with the same type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SegmentIdentity {
    pub line_number: usize,
    pub diff_type: DiffType,
}

impl SegmentIdentity {
    pub fn new(line_number: usize, diff_type: DiffType) -> Self {
        Self {
            line_number,
            diff_type,
        }
    }

    /// The identity a line record is addressed by.
    pub fn of(record: &LineRecord) -> Self {
        Self::new(record.line_number, record.diff_type)
    }
}

impl fmt::Display for SegmentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.line_number, self.diff_type)
    }
}

impl FromStr for SegmentIdentity {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| MergeError::InvalidIdentity {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (line, kind) = s
            .split_once('-')
            .ok_or_else(|| invalid("missing '-' separator"))?;
        let line_number: usize = line
            .parse()
            .map_err(|_| invalid("line number is not a positive integer"))?;
        if line_number == 0 {
            return Err(invalid("line numbers start at 1"));
        }
        let diff_type = DiffType::from_name(kind).ok_or_else(|| invalid("unknown diff type"))?;

        Ok(Self::new(line_number, diff_type))
    }
}

impl TryFrom<String> for SegmentIdentity {
    type Error = MergeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SegmentIdentity> for String {
    fn from(id: SegmentIdentity) -> Self {
        id.to_string()
    }
}
