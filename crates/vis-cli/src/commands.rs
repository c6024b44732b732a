//! Subcommand implementations.

use std::fs;

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use vis_core::{
    BatchExport, ImportedCase, Session, SessionConfig, Validation, ValidationStage,
    VisualizerConfig, validate_batch,
};
use vis_engine::{EngineSetupError, ProcessEngine};
use vis_model::{parse_case_count, parse_seed};

use crate::cli::{GenArgs, InspectArgs, MaxTurnArgs};
use vis_cli::summary::{TurnRow, export_table, print_frame, print_turns};

/// Exit code when the engine rejected the output.
pub const EXIT_REJECTED: i32 = 2;

pub fn run_gen(args: &GenArgs, config: &VisualizerConfig) -> Result<i32> {
    let seed = args
        .seed
        .as_deref()
        .map_or(config.session.seed, parse_seed);
    let count = args
        .count
        .as_deref()
        .map_or(config.export.count, parse_case_count);
    validate_batch(seed, count).map_err(|e| anyhow!(e.user_message()))?;
    config.engine.check_generator().map_err(setup_error)?;
    let engine = ProcessEngine::unchecked(config.engine.clone());

    let progress = ProgressBar::new(u64::from(count));
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} cases ({eta})")?
            .progress_chars("=> "),
    );
    let export = BatchExport::new();
    let result = export.export_batch_with_progress(&engine, seed, count, |done, _| {
        progress.set_position(u64::from(done));
    });
    progress.finish_and_clear();
    let artifact = result.context("Export failed")?;

    match args.out_dir.as_ref().or(config.export.out_dir.as_ref()) {
        Some(dir) => {
            let written = artifact.write_to_dir(dir)?;
            println!("{}", export_table(&artifact, &written));
        }
        None => print!("{}", artifact.to_text()),
    }
    Ok(0)
}

pub fn run_inspect(args: &InspectArgs, config: &VisualizerConfig) -> Result<i32> {
    let mut session_config = config.session.clone();
    if let Some(seed) = &args.seed {
        session_config.seed = parse_seed(seed);
    }
    if let Some(problem) = args.problem {
        session_config.problem = problem;
    }
    config.engine.check_visualizer().map_err(setup_error)?;

    let mut session = open_session(args, config, &session_config)?;
    if args.all_turns {
        // The bound comes from the engine; only `limit` rows are walked.
        let max_turn = session.settings().max_turn;
        let mut rows = Vec::new();
        for turn in (0..=max_turn).take(args.limit) {
            session.set_turn(i64::try_from(turn).context("Turn does not fit in i64")?)?;
            rows.push(TurnRow {
                turn: session.settings().turn,
                state: session.render_state().clone(),
            });
        }
        print_turns(&rows);
        if rows.len() <= max_turn {
            tracing::warn!(shown = rows.len(), max_turn, "Turn listing truncated");
            eprintln!(
                "note: showed turns 0 to {} of {max_turn}; raise --limit to see more",
                rows.len().saturating_sub(1)
            );
        }
    } else {
        if let Some(turn) = args.turn {
            session.set_turn(turn)?;
        }
        let view = session.view();
        print_frame(&view);
        if let (Some(path), Some(frame)) = (&args.svg, view.render.frame()) {
            fs::write(path, &frame.svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "SVG written");
        }
    }
    Ok(0)
}

pub fn run_max_turn(args: &MaxTurnArgs, config: &VisualizerConfig) -> Result<i32> {
    config.engine.check_visualizer().map_err(setup_error)?;
    let engine = ProcessEngine::unchecked(config.engine.clone());
    let case = ImportedCase::read_pair(&args.input, &args.output)?;
    let validation = ValidationStage::new().revalidate(&engine, &case.input, &case.output);
    println!("{}", validation.max_turn());
    Ok(match validation {
        Validation::Bounded(_) => 0,
        Validation::Rejected => {
            eprintln!("warning: the output was rejected; run with -vv for the cause");
            EXIT_REJECTED
        }
    })
}

fn open_session(
    args: &InspectArgs,
    config: &VisualizerConfig,
    session_config: &SessionConfig,
) -> Result<Session<ProcessEngine>> {
    let engine = ProcessEngine::unchecked(config.engine.clone());
    let case = match (&args.case, &args.input, &args.output) {
        (Some(path), _, _) => Some(ImportedCase::read(path)?),
        (None, Some(input), Some(output)) => Some(ImportedCase::read_pair(input, output)?),
        (None, Some(input), None) => Some(ImportedCase {
            input: fs::read_to_string(input)
                .with_context(|| format!("Failed to read {}", input.display()))?,
            output: String::new(),
        }),
        (None, None, _) => None,
    };
    if let Some(case) = case {
        return Ok(Session::from_case(engine, session_config, case)?);
    }

    config.engine.check_generator().map_err(setup_error)?;
    let mut session = Session::new(engine, session_config)?;
    if let Some(path) = &args.output {
        let output = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        session.set_output(output)?;
    }
    Ok(session)
}

fn setup_error(error: EngineSetupError) -> anyhow::Error {
    anyhow!("{}\n  hint: {}", error, error.suggestion())
}
