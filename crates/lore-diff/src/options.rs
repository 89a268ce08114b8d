use serde::{Deserialize, Serialize};
use similar::Algorithm;

/// Line-matching algorithm used by the line differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// Options for [`diff_lines_with`](crate::diff_lines_with).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffOptions {
    #[serde(default)]
    pub algorithm: DiffAlgorithm,
}

impl DiffOptions {
    pub fn with_algorithm(algorithm: DiffAlgorithm) -> Self {
        Self { algorithm }
    }
}
