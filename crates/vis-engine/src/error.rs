//! Engine error types.
//!
//! Validation and render errors are recoverable: the core degrades to a zeroed
//! turn range or a sentinel frame. Generation errors are not.

use thiserror::Error;
use vis_model::{MetricsKind, Problem};

/// The generator could not produce an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The generator ran and reported a failure.
    #[error("Generator failed for seed {seed}: {message}")]
    Failed { seed: u64, message: String },

    /// The generator could not be started.
    #[error("Generator unavailable: {0}")]
    Unavailable(String),
}

/// `output` cannot be interpreted against `input`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Output cannot be interpreted against input: {message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// No frame can be produced for `(input, output, turn)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The requested turn lies past the bound for this case.
    #[error("Turn {turn} exceeds the bound {max_turn}")]
    TurnOutOfRange { turn: usize, max_turn: usize },

    /// The engine returned metrics for a different problem.
    #[error("Frame carries {found} metrics but problem {problem} expects {expected}")]
    MetricsMismatch {
        problem: Problem,
        expected: MetricsKind,
        found: MetricsKind,
    },

    /// Any other engine-reported failure.
    #[error("{0}")]
    Engine(String),
}

impl RenderError {
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }
}

/// A [`crate::ProcessEngine`] cannot be built from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineSetupError {
    #[error("No {role} command configured")]
    MissingCommand { role: &'static str },
}

impl EngineSetupError {
    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> String {
        match self {
            Self::MissingCommand { role } => format!(
                "Set `engine.{role}` in the config file or pass --{role} on the command line."
            ),
        }
    }
}
