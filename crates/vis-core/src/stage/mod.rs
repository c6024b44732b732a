//! Recomputation stages behind the dependency graph nodes.
//!
//! - [`GenerationStage`]: `seed -> input`
//! - [`ValidationStage`]: `(input, output) -> max_turn`, resetting `turn`
//! - [`RenderStage`]: `(input, output, turn, problem) -> RenderState`
//!
//! Each stage memoizes on its dependency tuple so an unchanged key never
//! reaches the engine twice in a row.

mod generation;
mod render;
mod validation;

pub use generation::GenerationStage;
pub use render::{
    FrameKey, RenderOutcome, RenderPlan, RenderRequest, RenderStage, RenderState, render_frame,
    spawn_render,
};
pub use validation::{Validation, ValidationStage};
