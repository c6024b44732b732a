//! Reactive recomputation core for the turn visualizer.
//!
//! Keeps `seed`, `input`, `output`, `turn`, `max_turn` and the rendered frame
//! consistent while an external engine does the actual work:
//!
//! - [`SettingsStore`]: Owned settings with field-level change reporting
//! - [`graph`]: The dependency graph (`Input`, `MaxTurn`, `Frame` nodes)
//! - [`stage`]: Generation, validation and render stages with memoization
//! - [`TurnControl`]: Clamped turn navigation
//! - [`BatchExport`]: Single-flight bulk case generation
//! - [`ImportedCase`]: Uploaded `(input, output)` artifacts
//! - [`Session`]: Ties the above together behind one mutation API
//!
//! # Example
//!
//! ```no_run
//! use vis_core::{Session, SessionConfig, VisualizerConfig};
//! use vis_engine::ProcessEngine;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VisualizerConfig::load_or_default(None);
//! let engine = ProcessEngine::new(config.engine.clone())?;
//! let mut session = Session::new(engine, &config.session)?;
//! session.set_output("RRDL\n")?;
//! session.set_turn(3)?;
//! println!("{}", session.view().render.label());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod flight;
pub mod graph;
pub mod import;
pub mod memo;
pub mod session;
pub mod stage;
pub mod store;
pub mod turn;

pub use config::{ExportConfig, SessionConfig, VisualizerConfig};
pub use error::{ConfigError, ExportError, ImportError, SessionError};
pub use export::{BatchArtifact, BatchExport, ExportGuard, validate_batch};
pub use graph::Node;
pub use import::ImportedCase;
pub use session::{RenderMode, Session, SessionView};
pub use stage::{
    FrameKey, GenerationStage, RenderOutcome, RenderPlan, RenderRequest, RenderStage,
    RenderState, Validation, ValidationStage, render_frame, spawn_render,
};
pub use store::{Field, FieldSet, SettingsStore};
pub use turn::{TurnCommand, TurnControl};
