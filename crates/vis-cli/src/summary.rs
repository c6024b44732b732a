//! Terminal presentation of session state.

use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use vis_core::{BatchArtifact, RenderState, SessionView};

/// One row of a per-turn listing.
#[derive(Debug, Clone)]
pub struct TurnRow {
    pub turn: usize,
    pub state: RenderState,
}

/// Label/value pairs describing the current frame, in display order.
pub fn frame_rows(view: &SessionView) -> Vec<(&'static str, String)> {
    let settings = &view.settings;
    let mut rows = vec![
        ("Seed", settings.seed.to_string()),
        ("Problem", settings.problem.to_string()),
        ("Turn", format!("{} / {}", settings.turn, settings.max_turn)),
        ("State", view.render.label().to_string()),
    ];
    match view.render.frame() {
        Some(frame) => {
            rows.push(("Score", frame.score.to_string()));
            for (label, value) in frame.metrics.entries() {
                rows.push((label, value));
            }
            rows.push(("Markup", markup_summary(&frame.svg, &view.render)));
        }
        None => rows.push(("Score", "-".to_string())),
    }
    rows
}

/// Table view of [`frame_rows`].
pub fn frame_table(view: &SessionView) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (label, value) in frame_rows(view) {
        let value_cell = match (label, &view.render) {
            ("State", RenderState::Valid(_)) => Cell::new(value).fg(Color::Green),
            ("State", RenderState::Invalid(_)) => Cell::new(value)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            ("State", RenderState::Pending) => Cell::new(value).fg(Color::Yellow),
            _ => Cell::new(value),
        };
        table.add_row(vec![Cell::new(label), value_cell]);
    }
    table
}

pub fn print_frame(view: &SessionView) {
    println!("{}", frame_table(view));
}

/// One row per turn: turn, state, score, metrics.
pub fn turns_table(rows: &[TurnRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Turn"),
        header_cell("State"),
        header_cell("Score"),
        header_cell("Metrics"),
    ]);
    apply_list_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in rows {
        let (score, metrics) = match row.state.frame() {
            Some(frame) => (
                frame.score.to_string(),
                frame
                    .metrics
                    .entries()
                    .into_iter()
                    .map(|(label, value)| format!("{label}={value}"))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            None => ("-".to_string(), String::new()),
        };
        let state = match &row.state {
            RenderState::Invalid(_) => Cell::new(row.state.label()).fg(Color::Red),
            _ => Cell::new(row.state.label()),
        };
        table.add_row(vec![Cell::new(row.turn), state, Cell::new(score), Cell::new(metrics)]);
    }
    table
}

pub fn print_turns(rows: &[TurnRow]) {
    println!("{}", turns_table(rows));
}

/// Summary of a finished export.
pub fn export_table(artifact: &BatchArtifact, written: &[PathBuf]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Seeds"), header_cell("Cases"), header_cell("Output")]);
    apply_table_style(&mut table);
    let seeds = match (artifact.seeds().next(), artifact.seeds().last()) {
        (Some(first), Some(last)) if first != last => format!("{first}..={last}"),
        (Some(first), _) => first.to_string(),
        _ => "-".to_string(),
    };
    let output = match written.first().and_then(|path| path.parent()) {
        Some(dir) => dir.display().to_string(),
        None => "stdout".to_string(),
    };
    table.add_row(vec![Cell::new(seeds), Cell::new(artifact.len()), Cell::new(output)]);
    table
}

fn markup_summary(svg: &str, state: &RenderState) -> String {
    match state {
        RenderState::Invalid(_) => svg.to_string(),
        _ => format!("{} bytes", svg.len()),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_list_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
