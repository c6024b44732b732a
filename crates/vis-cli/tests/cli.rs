//! End-to-end runs of the `vis` binary against shell-script engines.
#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const GENERATOR: &str = r#"echo "case $1""#;

const VISUALIZER: &str = r#"request=$(cat)
case "$request" in *reject*) echo "unknown move" >&2; exit 1;; esac
case "$1" in
  max-turn) case "$request" in *huge*) echo 18446744073709551615 ;; *) echo 4 ;; esac ;;
  render) printf '{"score":%s,"svg":"<svg>%s</svg>","metrics":{"kind":"kinematic","pos":"p","vel":"v"}}' "$2" "$2" ;;
esac
"#;

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fixture.write("gen.sh", GENERATOR);
        fixture.write("vis.sh", VISUALIZER);
        fixture
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_vis"))
            .arg("--config")
            .arg(self.path("missing-config.toml"))
            .arg("--generator")
            .arg(sh(&self.path("gen.sh")))
            .arg("--visualizer")
            .arg(sh(&self.path("vis.sh")))
            .arg("--color")
            .arg("never")
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

fn sh(script: &Path) -> String {
    format!("sh {}", script.display())
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn gen_prints_cases_in_seed_order() {
    let fixture = Fixture::new();
    let output = fixture.run(&["gen", "--seed", "5", "-n", "3"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "case 5\ncase 6\ncase 7\n");
}

#[test]
fn gen_writes_one_file_per_seed() {
    let fixture = Fixture::new();
    let out_dir = fixture.path("in");
    let output = fixture.run(&[
        "gen",
        "--seed",
        "1",
        "-n",
        "2",
        "--out-dir",
        out_dir.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(fs::read_to_string(out_dir.join("0001.txt")).unwrap(), "case 1\n");
    assert_eq!(fs::read_to_string(out_dir.join("0002.txt")).unwrap(), "case 2\n");
}

#[test]
fn gen_rejects_out_of_range_count() {
    let fixture = Fixture::new();
    let output = fixture.run(&["gen", "-n", "abc"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Choose between 1 and 10000 cases."));
}

#[test]
fn max_turn_prints_bound() {
    let fixture = Fixture::new();
    let input = fixture.write("in.txt", "1 2 3\n");
    let answer = fixture.write("out.txt", "R\n");
    let output = fixture.run(&[
        "max-turn",
        "--input",
        input.to_str().unwrap(),
        "--output",
        answer.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "4\n");
}

#[test]
fn max_turn_reports_rejected_output_as_zero() {
    let fixture = Fixture::new();
    let input = fixture.write("in.txt", "1 2 3\n");
    let answer = fixture.write("out.txt", "reject\n");
    let output = fixture.run(&[
        "max-turn",
        "--input",
        input.to_str().unwrap(),
        "--output",
        answer.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "0\n");
}

#[test]
fn inspect_case_clamps_turn_and_writes_svg() {
    let fixture = Fixture::new();
    let case = fixture.write("case.json", r#"{"input": "1 2 3\n", "output": "R\nL\n"}"#);
    let svg = fixture.path("frame.svg");
    let output = fixture.run(&[
        "inspect",
        "--case",
        case.to_str().unwrap(),
        "--turn",
        "9",
        "--svg",
        svg.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let table = stdout(&output);
    assert!(table.contains("4 / 4"), "{table}");
    assert!(table.contains("valid"), "{table}");
    assert_eq!(fs::read_to_string(&svg).unwrap(), "<svg>4</svg>");
}

#[test]
fn inspect_generates_input_from_seed() {
    let fixture = Fixture::new();
    let answer = fixture.write("out.txt", "R\n");
    let output = fixture.run(&[
        "inspect",
        "--seed",
        "8",
        "--output",
        answer.to_str().unwrap(),
        "--all-turns",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let table = stdout(&output);
    // One row per turn 0..=4.
    assert_eq!(table.matches("valid").count(), 5, "{table}");
    assert!(table.contains("pos=p vel=v"), "{table}");
}

#[test]
fn all_turns_listing_is_capped_for_huge_bounds() {
    let fixture = Fixture::new();
    let case = fixture.write("case.json", r#"{"input": "1", "output": "huge"}"#);
    let output = fixture.run(&[
        "inspect",
        "--case",
        case.to_str().unwrap(),
        "--all-turns",
        "--limit",
        "3",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let table = stdout(&output);
    assert_eq!(table.matches("valid").count(), 3, "{table}");
    assert!(
        stderr(&output).contains("showed turns 0 to 2 of 18446744073709551615"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn inspect_rejected_output_shows_sentinel() {
    let fixture = Fixture::new();
    let case = fixture.write("case.json", r#"{"input": "1", "output": "reject"}"#);
    let output = fixture.run(&["inspect", "--case", case.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let table = stdout(&output);
    assert!(table.contains("0 / 0"), "{table}");
    assert!(table.contains("invalid input or output"), "{table}");
}

#[test]
fn malformed_case_file_fails() {
    let fixture = Fixture::new();
    let case = fixture.write("case.json", "input:\n1 2 3\n");
    let output = fixture.run(&["inspect", "--case", case.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("input and output"));
}
