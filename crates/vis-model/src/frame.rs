//! Rendered frame for one turn.

use serde::{Deserialize, Serialize};

use crate::problem::{MetricsKind, Problem};

/// Markup shown in place of a visual when a frame cannot be rendered.
pub const INVALID_FRAME_MARKUP: &str = "invalid input or output";

/// Problem-specific readouts attached to a frame.
///
/// Exactly one variant is valid for a given [`Problem`]; see
/// [`Problem::metrics_kind`]. Serialized with an internal `kind` tag:
///
/// ```
/// use vis_model::Metrics;
///
/// let metrics: Metrics = serde_json::from_str(r#"{"kind":"deviation","sqdiff":2.5}"#).unwrap();
/// assert_eq!(metrics, Metrics::Deviation { sqdiff: 2.5 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metrics {
    Kinematic { pos: String, vel: String },
    Deviation { sqdiff: f64 },
    ScoreOnly,
}

impl Metrics {
    /// Zeroed metrics of the variant `problem` selects.
    pub fn zeroed(problem: Problem) -> Self {
        match problem.metrics_kind() {
            MetricsKind::Kinematic => Self::Kinematic {
                pos: String::new(),
                vel: String::new(),
            },
            MetricsKind::Deviation => Self::Deviation { sqdiff: 0.0 },
            MetricsKind::ScoreOnly => Self::ScoreOnly,
        }
    }

    pub fn kind(&self) -> MetricsKind {
        match self {
            Self::Kinematic { .. } => MetricsKind::Kinematic,
            Self::Deviation { .. } => MetricsKind::Deviation,
            Self::ScoreOnly => MetricsKind::ScoreOnly,
        }
    }

    /// Returns true if this variant is the one `problem` selects.
    pub fn matches(&self, problem: Problem) -> bool {
        self.kind() == problem.metrics_kind()
    }

    /// Label/value pairs for display, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Kinematic { pos, vel } => vec![("pos", pos.clone()), ("vel", vel.clone())],
            Self::Deviation { sqdiff } => vec![("sqdiff", sqdiff.to_string())],
            Self::ScoreOnly => Vec::new(),
        }
    }
}

/// Result of rendering one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub score: f64,
    /// SVG markup, or [`INVALID_FRAME_MARKUP`] for the sentinel frame.
    pub svg: String,
    pub metrics: Metrics,
}

impl Frame {
    /// The fixed frame shown when rendering fails.
    ///
    /// The same value is produced regardless of why rendering failed.
    pub fn invalid(problem: Problem) -> Self {
        Self {
            score: 0.0,
            svg: INVALID_FRAME_MARKUP.to_string(),
            metrics: Metrics::zeroed(problem),
        }
    }

    /// Returns true if this is the sentinel produced by [`Frame::invalid`].
    pub fn is_invalid_sentinel(&self) -> bool {
        self.svg == INVALID_FRAME_MARKUP && self.score == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_frame_uses_problem_variant() {
        assert_eq!(
            Frame::invalid(Problem::A).metrics,
            Metrics::Kinematic {
                pos: String::new(),
                vel: String::new()
            }
        );
        assert_eq!(
            Frame::invalid(Problem::B).metrics,
            Metrics::Deviation { sqdiff: 0.0 }
        );
        assert_eq!(Frame::invalid(Problem::C).metrics, Metrics::ScoreOnly);
    }

    #[test]
    fn test_invalid_frame_is_sentinel() {
        let frame = Frame::invalid(Problem::C);
        assert!(frame.is_invalid_sentinel());
        assert_eq!(frame.svg, "invalid input or output");
    }

    #[test]
    fn test_metrics_matches_problem() {
        let metrics = Metrics::Deviation { sqdiff: 1.0 };
        assert!(metrics.matches(Problem::B));
        assert!(!metrics.matches(Problem::A));
    }

    #[test]
    fn test_frame_json_shape() {
        let json = r#"{"score":12.0,"svg":"<svg/>","metrics":{"kind":"kinematic","pos":"1 2","vel":"0 1"}}"#;
        let frame: Frame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.score, 12.0);
        assert_eq!(frame.metrics.kind(), MetricsKind::Kinematic);
        assert_eq!(
            frame.metrics.entries(),
            vec![("pos", "1 2".to_string()), ("vel", "0 1".to_string())]
        );
    }

    #[test]
    fn test_score_only_has_no_entries() {
        assert!(Metrics::ScoreOnly.entries().is_empty());
    }
}
