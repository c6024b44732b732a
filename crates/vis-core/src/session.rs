//! Visualizer session.
//!
//! A [`Session`] owns the settings store, the three recomputation stages and
//! the export trigger. Every mutation follows the same path:
//!
//! 1. write the field through the [`SettingsStore`], collecting the change set
//! 2. [`graph::propagate`] the change set through the derived nodes
//! 3. hand the resulting frame key to the [`RenderStage`]
//!
//! Nothing is recomputed for a mutation that changes no field.

use std::sync::Arc;

use serde::Serialize;
use vis_engine::Engine;
use vis_model::{Problem, Settings, parse_seed};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::export::BatchExport;
use crate::graph::{self, Node};
use crate::import::ImportedCase;
use crate::stage::{
    FrameKey, GenerationStage, RenderOutcome, RenderPlan, RenderRequest, RenderStage,
    RenderState, ValidationStage, spawn_render,
};
use crate::store::{Field, FieldSet, SettingsStore};
use crate::turn::{TurnCommand, TurnControl};

/// How frame renders are executed after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Render on the calling thread before the mutation returns.
    #[default]
    Immediate,
    /// Leave the render state `Pending` and queue a request; the caller runs
    /// it with [`Session::flush_render`] or [`Session::take_render_request`].
    Deferred,
}

/// Read-only snapshot of everything a front end displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub settings: Settings,
    pub render: RenderState,
    /// The turn slider accepts input.
    pub turn_enabled: bool,
    /// The download button accepts input.
    pub export_enabled: bool,
}

/// One visualizer session over an engine.
pub struct Session<E> {
    engine: Arc<E>,
    store: SettingsStore,
    generation: GenerationStage,
    validation: ValidationStage,
    render: RenderStage,
    export: BatchExport,
    mode: RenderMode,
    queued: Option<RenderRequest>,
}

impl<E> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("settings", self.store.settings())
            .field("render", self.render.state())
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<E: Engine> Session<E> {
    /// Start a session at `config`'s seed and problem, generating its input.
    pub fn new(engine: E, config: &SessionConfig) -> Result<Self, SessionError> {
        Self::with_mode(Arc::new(engine), config, RenderMode::Immediate)
    }

    /// Like [`Session::new`] with an explicit render mode and a shared engine.
    pub fn with_mode(
        engine: Arc<E>,
        config: &SessionConfig,
        mode: RenderMode,
    ) -> Result<Self, SessionError> {
        let settings = Settings {
            seed: config.seed,
            problem: config.problem,
            ..Settings::default()
        };
        let mut session = Self::from_store(engine, SettingsStore::with_settings(settings), mode);
        session.settle(FieldSet::all())?;
        Ok(session)
    }

    /// Start a session from an existing case without running the generator.
    ///
    /// `config.seed` is recorded but does not overwrite `case.input`.
    pub fn from_case(
        engine: E,
        config: &SessionConfig,
        case: ImportedCase,
    ) -> Result<Self, SessionError> {
        let settings = Settings {
            seed: config.seed,
            problem: config.problem,
            input: case.input,
            output: case.output,
            ..Settings::default()
        };
        let mut session = Self::from_store(
            Arc::new(engine),
            SettingsStore::with_settings(settings),
            RenderMode::Immediate,
        );
        session.settle(FieldSet::all().without(Field::Seed))?;
        Ok(session)
    }

    fn from_store(engine: Arc<E>, store: SettingsStore, mode: RenderMode) -> Self {
        Self {
            engine,
            store,
            generation: GenerationStage::new(),
            validation: ValidationStage::new(),
            render: RenderStage::new(),
            export: BatchExport::new(),
            mode,
            queued: None,
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    #[inline]
    pub fn render_state(&self) -> &RenderState {
        self.render.state()
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Export trigger sharing this session's busy flag.
    pub fn export(&self) -> &BatchExport {
        &self.export
    }

    /// Number of render calls sent to the engine so far.
    pub fn render_calls(&self) -> u64 {
        self.render.engine_calls()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            settings: self.store.settings().clone(),
            render: self.render.state().clone(),
            turn_enabled: TurnControl::is_enabled(self.store.max_turn()),
            export_enabled: self.export.is_enabled(),
        }
    }

    /// Change the seed, regenerating the input.
    ///
    /// A hand-edited input is discarded. If generation fails the previous
    /// seed is restored, so the stored input always belongs to the stored
    /// seed and retrying the same seed calls the generator again.
    pub fn set_seed(&mut self, seed: u64) -> Result<(), SessionError> {
        let previous = self.store.seed();
        let changed = self.store.set_seed(seed);
        if let Err(e) = self.settle(changed) {
            // Generation runs first, so nothing downstream was touched.
            let _ = self.store.set_seed(previous);
            tracing::debug!(seed, previous, "Restored previous seed after failed generation");
            return Err(e);
        }
        Ok(())
    }

    /// Change the seed from control text; non-numeric text means seed `0`.
    pub fn set_seed_text(&mut self, text: &str) -> Result<(), SessionError> {
        self.set_seed(parse_seed(text))
    }

    pub fn set_problem(&mut self, problem: Problem) -> Result<(), SessionError> {
        let changed = self.store.set_problem(problem);
        self.settle(changed)
    }

    pub fn set_input(&mut self, input: impl Into<String>) -> Result<(), SessionError> {
        let changed = self.store.set_input(input);
        self.settle(changed)
    }

    pub fn set_output(&mut self, output: impl Into<String>) -> Result<(), SessionError> {
        let changed = self.store.set_output(output);
        self.settle(changed)
    }

    /// Replace input and output in a single mutation.
    pub fn import(&mut self, case: ImportedCase) -> Result<(), SessionError> {
        let changed = self.store.set_case(case.input, case.output);
        self.settle(changed)
    }

    /// Parse an uploaded artifact and import it. A malformed artifact leaves
    /// the session unchanged.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let case = ImportedCase::parse(bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected imported artifact");
        })?;
        self.import(case)
    }

    /// Apply a turn control command. A no-op while the control is disabled.
    pub fn turn(&mut self, command: TurnCommand) -> Result<(), SessionError> {
        let changed = TurnControl::apply(&mut self.store, command);
        self.settle(changed)
    }

    /// Request turn `requested`, clamped into `[0, max_turn]`.
    pub fn set_turn(&mut self, requested: i64) -> Result<(), SessionError> {
        self.turn(TurnCommand::Set(requested))
    }

    /// Take the queued render request, if any, to run elsewhere.
    ///
    /// Only queued in [`RenderMode::Deferred`].
    pub fn take_render_request(&mut self) -> Option<RenderRequest> {
        self.queued.take()
    }

    /// Publish a finished render. Returns false if it was superseded.
    pub fn complete_render(&mut self, outcome: RenderOutcome) -> bool {
        self.render.complete(outcome)
    }

    fn settle(&mut self, changed: FieldSet) -> Result<(), SessionError> {
        if changed.is_empty() {
            tracing::trace!("No field changed; nothing to recompute");
            return Ok(());
        }
        let _span = tracing::debug_span!("settle", ?changed).entered();
        let ran = self.propagate(changed)?;
        tracing::debug!(
            ?ran,
            turn = self.store.turn(),
            max_turn = self.store.max_turn(),
            "Settled"
        );
        Ok(())
    }

    fn propagate(&mut self, changed: FieldSet) -> Result<Vec<Node>, SessionError> {
        let Self {
            engine,
            store,
            generation,
            validation,
            render,
            mode,
            queued,
            ..
        } = self;
        let engine: &E = &**engine;

        graph::propagate::<SessionError>(changed, |node| match node {
            Node::Input => Ok(generation.apply(engine, store)?),
            Node::MaxTurn => Ok(validation.apply(engine, store)),
            Node::Frame => {
                let key = FrameKey::from_settings(store.settings());
                match mode {
                    RenderMode::Immediate => render.render_now(engine, key),
                    RenderMode::Deferred => match render.request(key) {
                        RenderPlan::Dispatch(request) => *queued = Some(request),
                        RenderPlan::Cached => *queued = None,
                        RenderPlan::InFlight => {}
                    },
                }
                Ok(FieldSet::empty())
            }
        })
    }
}

impl<E> Session<E>
where
    E: Engine + Send + Sync + 'static,
{
    /// Run the queued render on a blocking tokio thread and publish it.
    ///
    /// Returns true if a frame was published.
    pub async fn flush_render(&mut self) -> bool {
        let Some(request) = self.queued.take() else {
            return false;
        };
        let outcome = spawn_render(Arc::clone(&self.engine), request).await;
        self.render.complete(outcome)
    }
}
