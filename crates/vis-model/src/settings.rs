//! Session settings and generated test cases.

use serde::{Deserialize, Serialize};

use crate::problem::Problem;

/// The fields a visualizer session keeps mutually consistent.
///
/// `turn` never exceeds `max_turn` once a session has settled. The struct
/// itself does not enforce that; the owning store does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub seed: u64,
    pub problem: Problem,
    pub input: String,
    pub output: String,
    pub turn: usize,
    pub max_turn: usize,
}

impl Settings {
    /// Returns true if `turn` lies within `[0, max_turn]`.
    #[inline]
    pub fn turn_in_range(&self) -> bool {
        self.turn <= self.max_turn
    }
}

/// One generated problem instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub seed: u64,
    pub input: String,
}

impl TestCase {
    pub fn new(seed: u64, input: impl Into<String>) -> Self {
        Self {
            seed,
            input: input.into(),
        }
    }

    /// File name used when cases are written one per file (`0005.txt`).
    pub fn file_name(&self) -> String {
        format!("{:04}.txt", self.seed)
    }
}
