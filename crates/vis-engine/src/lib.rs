//! Engine boundary for the turn visualizer.
//!
//! The engine generates problem instances, bounds the number of turns for a
//! candidate output, and renders one turn at a time. Its algorithms live
//! outside this workspace; this crate only fixes the contract:
//!
//! - [`Engine::generate`]: deterministic `seed -> input`
//! - [`Engine::compute_max_turn`]: `(input, output) -> max_turn`, or a [`ValidationError`]
//! - [`Engine::render`]: `(input, output, turn) -> Frame`, or a [`RenderError`]
//!
//! [`ProcessEngine`] implements the contract by running external generator and
//! visualizer commands.

mod error;
mod process;

use std::sync::Arc;

use vis_model::Frame;

pub use error::{EngineSetupError, GenerateError, RenderError, ValidationError};
pub use process::{ProcessEngine, ProcessEngineConfig};

/// Capability set required of a generation/rendering engine.
///
/// Implementations must be deterministic: the same arguments always produce
/// the same result.
pub trait Engine {
    /// Generate the input text for `seed`.
    ///
    /// An error here means the engine itself is broken; callers treat it as
    /// fatal rather than as a recoverable state.
    fn generate(&self, seed: u64) -> Result<String, GenerateError>;

    /// Number of turns `output` plays out against `input`.
    fn compute_max_turn(&self, input: &str, output: &str) -> Result<usize, ValidationError>;

    /// Render the state after `turn` turns.
    fn render(&self, input: &str, output: &str, turn: usize) -> Result<Frame, RenderError>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn generate(&self, seed: u64) -> Result<String, GenerateError> {
        (**self).generate(seed)
    }

    fn compute_max_turn(&self, input: &str, output: &str) -> Result<usize, ValidationError> {
        (**self).compute_max_turn(input, output)
    }

    fn render(&self, input: &str, output: &str, turn: usize) -> Result<Frame, RenderError> {
        (**self).render(input, output, turn)
    }
}

impl<E: Engine + ?Sized> Engine for Arc<E> {
    fn generate(&self, seed: u64) -> Result<String, GenerateError> {
        (**self).generate(seed)
    }

    fn compute_max_turn(&self, input: &str, output: &str) -> Result<usize, ValidationError> {
        (**self).compute_max_turn(input, output)
    }

    fn render(&self, input: &str, output: &str, turn: usize) -> Result<Frame, RenderError> {
        (**self).render(input, output, turn)
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn generate(&self, seed: u64) -> Result<String, GenerateError> {
        (**self).generate(seed)
    }

    fn compute_max_turn(&self, input: &str, output: &str) -> Result<usize, ValidationError> {
        (**self).compute_max_turn(input, output)
    }

    fn render(&self, input: &str, output: &str, turn: usize) -> Result<Frame, RenderError> {
        (**self).render(input, output, turn)
    }
}
