//! Input generation from the seed.

use vis_engine::{Engine, GenerateError};

use crate::memo::Memo;
use crate::store::{FieldSet, SettingsStore};

/// Derives `input` from `seed`.
///
/// The write is unconditional: a hand-edited input is replaced by the
/// generated one whenever the seed changes.
#[derive(Debug, Default)]
pub struct GenerationStage {
    memo: Memo<u64, String>,
}

impl GenerationStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generated input for `seed`.
    pub fn regenerate<E: Engine>(&mut self, engine: &E, seed: u64) -> Result<String, GenerateError> {
        self.memo.try_get_or_insert_with(seed, |seed| {
            tracing::debug!(seed, "Generating input");
            engine.generate(*seed)
        })
    }

    /// Regenerate from the store's seed and overwrite its input.
    pub fn apply<E: Engine>(
        &mut self,
        engine: &E,
        store: &mut SettingsStore,
    ) -> Result<FieldSet, GenerateError> {
        let input = self.regenerate(engine, store.seed()).inspect_err(|e| {
            tracing::error!(seed = store.seed(), error = %e, "Input generation failed");
        })?;
        Ok(store.set_input(input))
    }
}
