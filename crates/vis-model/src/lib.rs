//! Data model for the turn visualizer.
//!
//! This crate holds the plain data shared by the engine boundary and the
//! recomputation core:
//!
//! - [`Problem`]: Problem selector (`A`, `B`, `C`) and the metrics variant it selects
//! - [`Frame`] / [`Metrics`]: Rendered result for one turn
//! - [`Settings`]: The fields a session keeps consistent
//! - [`TestCase`]: A generated `(seed, input)` pair
//! - [`numeric`]: Lenient parsing of seed and case-count text
//!
//! # Example
//!
//! ```
//! use vis_model::{Frame, Problem};
//!
//! let frame = Frame::invalid(Problem::B);
//! assert_eq!(frame.score, 0.0);
//! assert!(frame.metrics.matches(Problem::B));
//! ```

pub mod frame;
pub mod numeric;
pub mod problem;
pub mod settings;

pub use frame::{Frame, INVALID_FRAME_MARKUP, Metrics};
pub use numeric::{
    CASE_COUNT_MAX, CASE_COUNT_MIN, DEFAULT_CASE_COUNT, parse_case_count, parse_seed,
};
pub use problem::{MetricsKind, ParseProblemError, Problem};
pub use settings::{Settings, TestCase};
