//! Integration tests for the out-of-process engine using small shell scripts.
#![cfg(unix)]

use vis_engine::{Engine, GenerateError, ProcessEngine, ProcessEngineConfig, RenderError};
use vis_model::{Metrics, MetricsKind};

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

/// `$0` is the first argument appended by the engine.
fn scripted_engine() -> ProcessEngine {
    ProcessEngine::new(ProcessEngineConfig {
        generator: sh(r#"echo "seed $0""#),
        visualizer: sh(
            r#"request=$(cat)
case "$request" in *'"output":""'*) echo "empty output" >&2; exit 2;; esac
if [ "$0" = max-turn ]; then echo 4; exit 0; fi
if [ "$1" -gt 4 ]; then echo "turn out of range" >&2; exit 3; fi
printf '{"score":%s,"svg":"<svg/>","metrics":{"kind":"deviation","sqdiff":0.5}}' "$1""#,
        ),
    })
    .unwrap()
}

#[test]
fn generate_is_deterministic() {
    let engine = scripted_engine();
    let first = engine.generate(5).unwrap();
    let second = engine.generate(5).unwrap();
    assert_eq!(first, "seed 5\n");
    assert_eq!(first, second);
}

#[test]
fn compute_max_turn_parses_bound() {
    let engine = scripted_engine();
    assert_eq!(engine.compute_max_turn("1 2", "3").unwrap(), 4);
}

#[test]
fn compute_max_turn_reports_rejected_output() {
    let engine = scripted_engine();
    let err = engine.compute_max_turn("1 2", "").unwrap_err();
    assert!(err.message.contains("empty output"), "{}", err.message);
}

#[test]
fn render_decodes_frame() {
    let engine = scripted_engine();
    let frame = engine.render("1 2", "3", 3).unwrap();
    assert_eq!(frame.score, 3.0);
    assert_eq!(frame.svg, "<svg/>");
    assert_eq!(frame.metrics, Metrics::Deviation { sqdiff: 0.5 });
    assert_eq!(frame.metrics.kind(), MetricsKind::Deviation);
}

#[test]
fn render_reports_engine_failure() {
    let engine = scripted_engine();
    let err = engine.render("1 2", "3", 9).unwrap_err();
    match err {
        RenderError::Engine(message) => assert!(message.contains("turn out of range")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn render_rejects_undecodable_frame() {
    let engine = ProcessEngine::new(ProcessEngineConfig {
        generator: sh("echo"),
        visualizer: sh("cat >/dev/null; echo not-json"),
    })
    .unwrap();
    let err = engine.render("", "x", 0).unwrap_err();
    assert!(err.to_string().starts_with("Undecodable frame"));
}

#[test]
fn failing_generator_is_reported_with_seed() {
    let engine = ProcessEngine::new(ProcessEngineConfig {
        generator: sh("echo broken >&2; exit 1"),
        visualizer: sh("cat"),
    })
    .unwrap();
    match engine.generate(11).unwrap_err() {
        GenerateError::Failed { seed, message } => {
            assert_eq!(seed, 11);
            assert!(message.contains("broken"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
