//! Turn-bound validation of `(input, output)`.

use vis_engine::Engine;

use crate::memo::Memo;
use crate::store::{FieldSet, SettingsStore};

/// Outcome of validating an `(input, output)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// The engine accepted the pair and reported this many turns.
    Bounded(usize),
    /// The engine could not interpret `output` against `input`.
    Rejected,
}

impl Validation {
    /// The bound to store: zero when rejected.
    pub fn max_turn(&self) -> usize {
        match self {
            Self::Bounded(max_turn) => *max_turn,
            Self::Rejected => 0,
        }
    }
}

/// Derives `max_turn` from `(input, output)` and resets `turn` to zero.
#[derive(Debug, Default)]
pub struct ValidationStage {
    memo: Memo<(String, String), Validation>,
}

impl ValidationStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the pair. Engine errors are logged and become
    /// [`Validation::Rejected`].
    pub fn revalidate<E: Engine>(&mut self, engine: &E, input: &str, output: &str) -> Validation {
        self.memo
            .get_or_insert_with((input.to_string(), output.to_string()), |(input, output)| {
                match engine.compute_max_turn(input, output) {
                    Ok(max_turn) => {
                        tracing::debug!(max_turn, "Output validated");
                        Validation::Bounded(max_turn)
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Output rejected; disabling turn control");
                        Validation::Rejected
                    }
                }
            })
    }

    /// Revalidate the store's pair, then write `max_turn` and reset `turn`.
    ///
    /// `turn` is zeroed in the same step so no render ever sees a turn from
    /// the previous bound.
    pub fn apply<E: Engine>(&mut self, engine: &E, store: &mut SettingsStore) -> FieldSet {
        let validation = self.revalidate(engine, store.input(), store.output());
        let changed = store.set_turn(0);
        changed.union(store.set_max_turn(validation.max_turn()))
    }
}
