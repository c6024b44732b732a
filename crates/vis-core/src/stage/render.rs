//! Frame rendering with stale-result suppression.
//!
//! Rendering is split into two phases so it works the same against a
//! synchronous engine and a slow or asynchronous one:
//!
//! 1. [`RenderStage::request`] decides whether the engine must run for the
//!    current key. On a cache miss it moves the stage to
//!    [`RenderState::Pending`] and hands out a [`RenderRequest`].
//! 2. [`RenderStage::complete`] publishes the result, unless a newer request
//!    superseded it in the meantime.

use std::sync::Arc;

use serde::Serialize;
use vis_engine::{Engine, RenderError};
use vis_model::{Frame, Problem, Settings};

use crate::flight::{FlightTracker, Ticket};
use crate::memo::Memo;

/// Everything a frame depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameKey {
    pub input: String,
    pub output: String,
    pub turn: usize,
    pub problem: Problem,
}

impl FrameKey {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            input: settings.input.clone(),
            output: settings.output.clone(),
            turn: settings.turn,
            problem: settings.problem,
        }
    }
}

/// What the result view shows.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "frame", rename_all = "snake_case")]
pub enum RenderState {
    /// Not computed yet for the current key.
    #[default]
    Pending,
    /// The engine rendered this frame.
    Valid(Frame),
    /// Rendering failed; holds the sentinel frame.
    Invalid(Frame),
}

impl RenderState {
    /// Frame to display, if one is available.
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            Self::Pending => None,
            Self::Valid(frame) | Self::Invalid(frame) => Some(frame),
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Valid(_) => "valid",
            Self::Invalid(_) => "invalid",
        }
    }
}

/// Engine work for one frame key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    ticket: Ticket<FrameKey>,
}

impl RenderRequest {
    pub fn key(&self) -> &FrameKey {
        self.ticket.key()
    }

    pub fn generation(&self) -> u64 {
        self.ticket.generation()
    }
}

/// A finished request and the engine's answer.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub request: RenderRequest,
    pub result: Result<Frame, RenderError>,
}

/// Decision returned by [`RenderStage::request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    /// The memo already holds this key; the state was restored from it.
    Cached,
    /// A request for this key is already running.
    InFlight,
    /// The engine must run for this request.
    Dispatch(RenderRequest),
}

/// Derives the displayed frame from [`FrameKey`].
#[derive(Debug, Default)]
pub struct RenderStage {
    state: RenderState,
    memo: Memo<FrameKey, RenderState>,
    flight: FlightTracker<FrameKey>,
    engine_calls: u64,
}

impl RenderStage {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Number of engine render calls issued through this stage.
    pub fn engine_calls(&self) -> u64 {
        self.engine_calls
    }

    /// Key of the request currently running, if any.
    pub fn in_flight(&self) -> Option<&FrameKey> {
        self.flight.in_flight()
    }

    /// Plan the work for `key`, superseding any request for another key.
    pub fn request(&mut self, key: FrameKey) -> RenderPlan {
        if let Some(cached) = self.memo.get(&key) {
            self.state = cached.clone();
            self.flight.cancel();
            return RenderPlan::Cached;
        }
        if self.flight.in_flight() == Some(&key) {
            return RenderPlan::InFlight;
        }
        self.state = RenderState::Pending;
        self.engine_calls += 1;
        RenderPlan::Dispatch(RenderRequest {
            ticket: self.flight.begin(key),
        })
    }

    /// Publish `outcome` unless it was superseded. Returns true if published.
    pub fn complete(&mut self, outcome: RenderOutcome) -> bool {
        let RenderOutcome { request, result } = outcome;
        if !self.flight.finish(&request.ticket) {
            tracing::debug!(
                generation = request.generation(),
                turn = request.key().turn,
                "Discarding superseded frame"
            );
            return false;
        }
        let key = request.ticket.into_key();
        let state = resolve(key.problem, result);
        self.memo.insert(key, state.clone());
        self.state = state;
        true
    }

    /// Request and, if needed, render `key` on the calling thread.
    pub fn render_now<E: Engine>(&mut self, engine: &E, key: FrameKey) {
        if let RenderPlan::Dispatch(request) = self.request(key) {
            let result = render_frame(engine, request.key());
            self.complete(RenderOutcome { request, result });
        }
    }
}

/// Call the engine for `key` and check the metrics variant against the problem.
pub fn render_frame<E: Engine>(engine: &E, key: &FrameKey) -> Result<Frame, RenderError> {
    let frame = engine.render(&key.input, &key.output, key.turn)?;
    if !frame.metrics.matches(key.problem) {
        return Err(RenderError::MetricsMismatch {
            problem: key.problem,
            expected: key.problem.metrics_kind(),
            found: frame.metrics.kind(),
        });
    }
    Ok(frame)
}

/// Run `request` on a blocking tokio thread.
///
/// The returned outcome must still go through [`RenderStage::complete`],
/// which drops it if a newer request was issued meanwhile.
pub async fn spawn_render<E>(engine: Arc<E>, request: RenderRequest) -> RenderOutcome
where
    E: Engine + Send + Sync + 'static,
{
    let key = request.key().clone();
    let result = tokio::task::spawn_blocking(move || render_frame(&engine, &key))
        .await
        .unwrap_or_else(|e| Err(RenderError::engine(format!("Render task panicked: {}", e))));
    RenderOutcome { request, result }
}

fn resolve(problem: Problem, result: Result<Frame, RenderError>) -> RenderState {
    match result {
        Ok(frame) => RenderState::Valid(frame),
        Err(e) => {
            tracing::warn!(error = %e, "Render failed; showing placeholder frame");
            RenderState::Invalid(Frame::invalid(problem))
        }
    }
}
