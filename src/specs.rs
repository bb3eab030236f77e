use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{GenErr, Result};

/// The specification for the `Task` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSpec {
    Ranking,
    Classification { num_classes: usize },
}

/// The specification for the `PointGenerator` struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSpec {
    pub task: TaskSpec,
    pub batch_size: NonZeroUsize,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_shuffle() -> bool {
    true
}

impl GeneratorSpec {
    /// Parses a `GeneratorSpec` from its json representation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GenErr::InvalidSpec(e.to_string()))
    }
}
