//! Problem selector.
//!
//! Each contest problem reports a different set of per-turn metrics. The
//! problem identifier selects which [`MetricsKind`] a rendered frame must
//! carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Problem selector shown next to the seed control.
///
/// # Example
///
/// ```
/// use vis_model::{MetricsKind, Problem};
///
/// let problem: Problem = "b".parse().unwrap();
/// assert_eq!(problem, Problem::B);
/// assert_eq!(problem.metrics_kind(), MetricsKind::Deviation);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Problem {
    #[default]
    A,
    B,
    C,
}

impl Problem {
    /// All problems in selector order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Selector label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// The metrics variant frames for this problem carry.
    pub fn metrics_kind(&self) -> MetricsKind {
        match self {
            Self::A => MetricsKind::Kinematic,
            Self::B => MetricsKind::Deviation,
            Self::C => MetricsKind::ScoreOnly,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a problem label is not one of `A`, `B`, `C`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown problem: {0}")]
pub struct ParseProblemError(pub String);

impl FromStr for Problem {
    type Err = ParseProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(ParseProblemError(s.to_string())),
        }
    }
}

/// Discriminant of [`crate::Metrics`], used to check a frame against a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsKind {
    /// Position and velocity readouts.
    Kinematic,
    /// Squared deviation from the target.
    Deviation,
    /// No metrics beyond score and markup.
    ScoreOnly,
}

impl MetricsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kinematic => "kinematic",
            Self::Deviation => "deviation",
            Self::ScoreOnly => "score_only",
        }
    }
}

impl fmt::Display for MetricsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("a".parse::<Problem>(), Ok(Problem::A));
        assert_eq!(" C ".parse::<Problem>(), Ok(Problem::C));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "D".parse::<Problem>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown problem: D");
    }

    #[test]
    fn test_each_problem_selects_distinct_metrics() {
        let kinds: Vec<_> = Problem::ALL.iter().map(Problem::metrics_kind).collect();
        assert_eq!(
            kinds,
            vec![
                MetricsKind::Kinematic,
                MetricsKind::Deviation,
                MetricsKind::ScoreOnly
            ]
        );
    }

    #[test]
    fn test_default_is_a() {
        assert_eq!(Problem::default(), Problem::A);
    }
}
