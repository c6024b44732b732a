//! Batch export of generated test cases.
//!
//! Generates `count` cases for consecutive seeds and hands them back as one
//! artifact. Only one export may run at a time: the busy flag disables the
//! trigger until the running export finishes, whether it succeeds or fails.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use vis_engine::Engine;
use vis_model::{CASE_COUNT_MAX, CASE_COUNT_MIN, TestCase};

use crate::error::ExportError;

/// Generated cases for consecutive seeds, in seed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchArtifact {
    cases: Vec<TestCase>,
}

impl BatchArtifact {
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn seeds(&self) -> impl Iterator<Item = u64> + '_ {
        self.cases.iter().map(|case| case.seed)
    }

    /// All inputs concatenated, each terminated by a newline.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for case in &self.cases {
            text.push_str(&case.input);
            if !case.input.ends_with('\n') {
                text.push('\n');
            }
        }
        text
    }

    /// Write one file per case into `dir`, creating it if needed.
    ///
    /// Returns the written paths in seed order.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut written = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            let path = dir.join(case.file_name());
            fs::write(&path, &case.input).map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
        tracing::info!(dir = %dir.display(), files = written.len(), "Export written");
        Ok(written)
    }
}

/// Single-flight batch exporter.
///
/// Clones share the busy flag, so a clone handed to a background task still
/// blocks the trigger it came from.
#[derive(Debug, Clone, Default)]
pub struct BatchExport {
    busy: Arc<AtomicBool>,
}

/// Holds the busy flag for one export; clears it on drop.
#[derive(Debug)]
pub struct ExportGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl BatchExport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the export trigger should be enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
    }

    /// Claim the busy flag, or fail with [`ExportError::Busy`].
    pub fn try_begin(&self) -> Result<ExportGuard, ExportError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::Busy)?;
        Ok(ExportGuard {
            busy: Arc::clone(&self.busy),
        })
    }

    /// Generate cases for `seed..seed + count`.
    pub fn export_batch<E: Engine>(
        &self,
        engine: &E,
        seed: u64,
        count: u32,
    ) -> Result<BatchArtifact, ExportError> {
        self.export_batch_with_progress(engine, seed, count, |_, _| {})
    }

    /// Like [`BatchExport::export_batch`], calling `on_case(done, total)` after
    /// each generated case.
    pub fn export_batch_with_progress<E: Engine>(
        &self,
        engine: &E,
        seed: u64,
        count: u32,
        on_case: impl FnMut(u32, u32),
    ) -> Result<BatchArtifact, ExportError> {
        let guard = self.try_begin()?;
        let result = generate_cases(engine, seed, count, on_case);
        drop(guard);
        result
    }

    /// Run the export on a blocking tokio thread.
    ///
    /// The busy flag is claimed when this is called, not when the future is
    /// first polled, so the trigger is disabled from the moment of the click.
    pub fn export_batch_async<E>(
        &self,
        engine: Arc<E>,
        seed: u64,
        count: u32,
    ) -> impl Future<Output = Result<BatchArtifact, ExportError>> + Send + 'static
    where
        E: Engine + Send + Sync + 'static,
    {
        let claimed = self.try_begin();
        async move {
            let guard = claimed?;
            tokio::task::spawn_blocking(move || {
                let _guard = guard;
                generate_cases(&engine, seed, count, |_, _| {})
            })
            .await
            .map_err(|e| ExportError::TaskFailed(e.to_string()))?
        }
    }
}

/// Check `count` and the seed range without generating anything.
pub fn validate_batch(seed: u64, count: u32) -> Result<(), ExportError> {
    if !(CASE_COUNT_MIN..=CASE_COUNT_MAX).contains(&count) {
        return Err(ExportError::InvalidCount {
            count,
            min: CASE_COUNT_MIN,
            max: CASE_COUNT_MAX,
        });
    }
    seed.checked_add(u64::from(count) - 1)
        .ok_or(ExportError::SeedOverflow { seed, count })?;
    Ok(())
}

fn generate_cases<E: Engine>(
    engine: &E,
    seed: u64,
    count: u32,
    mut on_case: impl FnMut(u32, u32),
) -> Result<BatchArtifact, ExportError> {
    validate_batch(seed, count)?;
    tracing::info!(seed, count, "Exporting test cases");

    let mut cases = Vec::with_capacity(count as usize);
    for (done, case_seed) in (seed..=seed + (u64::from(count) - 1)).enumerate() {
        let input = engine
            .generate(case_seed)
            .map_err(ExportError::Generation)?;
        cases.push(TestCase::new(case_seed, input));
        on_case(done as u32 + 1, count);
    }
    Ok(BatchArtifact { cases })
}
