//! Out-of-process engine.
//!
//! Runs a generator and a visualizer command per call:
//!
//! ```text
//! <generator...> <seed>                  stdout: input text
//! <visualizer...> max-turn               stdin: {"input": .., "output": ..}  stdout: integer
//! <visualizer...> render <turn>          stdin: {"input": .., "output": ..}  stdout: frame JSON
//! ```
//!
//! A non-zero exit status, or stdout that cannot be decoded, maps to the
//! error type of the corresponding engine operation.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use vis_model::Frame;

use crate::Engine;
use crate::error::{EngineSetupError, GenerateError, RenderError, ValidationError};

/// Commands backing a [`ProcessEngine`].
///
/// Each command is a program followed by its leading arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessEngineConfig {
    /// Generator command, e.g. `["./tools/gen"]`.
    pub generator: Vec<String>,
    /// Visualizer command, e.g. `["./tools/vis", "--json"]`.
    pub visualizer: Vec<String>,
}

/// Engine that delegates every call to external commands.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    config: ProcessEngineConfig,
}

#[derive(Serialize)]
struct CaseRequest<'a> {
    input: &'a str,
    output: &'a str,
}

impl ProcessEngineConfig {
    /// Fail if no generator command is configured.
    pub fn check_generator(&self) -> Result<(), EngineSetupError> {
        if self.generator.is_empty() {
            return Err(EngineSetupError::MissingCommand { role: "generator" });
        }
        Ok(())
    }

    /// Fail if no visualizer command is configured.
    pub fn check_visualizer(&self) -> Result<(), EngineSetupError> {
        if self.visualizer.is_empty() {
            return Err(EngineSetupError::MissingCommand { role: "visualizer" });
        }
        Ok(())
    }
}

impl ProcessEngine {
    /// Build an engine, checking that both commands are present.
    pub fn new(config: ProcessEngineConfig) -> Result<Self, EngineSetupError> {
        config.check_generator()?;
        config.check_visualizer()?;
        Ok(Self { config })
    }

    /// Build an engine without checking the commands.
    ///
    /// A call that needs a missing command fails like any other engine call,
    /// so a caller that never validates can run without a visualizer.
    pub fn unchecked(config: ProcessEngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessEngineConfig {
        &self.config
    }

    fn visualize(&self, args: &[String], input: &str, output: &str) -> Result<String, String> {
        let request = serde_json::to_vec(&CaseRequest { input, output })
            .map_err(|e| format!("Failed to encode request: {}", e))?;
        run_command(&self.config.visualizer, args, Some(request))
    }
}

impl Engine for ProcessEngine {
    fn generate(&self, seed: u64) -> Result<String, GenerateError> {
        run_command(&self.config.generator, &[seed.to_string()], None).map_err(|message| {
            if message.starts_with(SPAWN_FAILURE) {
                GenerateError::Unavailable(message)
            } else {
                GenerateError::Failed { seed, message }
            }
        })
    }

    fn compute_max_turn(&self, input: &str, output: &str) -> Result<usize, ValidationError> {
        let stdout = self
            .visualize(&["max-turn".to_string()], input, output)
            .map_err(ValidationError::new)?;
        stdout
            .trim()
            .parse::<usize>()
            .map_err(|e| ValidationError::new(format!("Invalid turn bound {:?}: {}", stdout.trim(), e)))
    }

    fn render(&self, input: &str, output: &str, turn: usize) -> Result<Frame, RenderError> {
        let stdout = self
            .visualize(&["render".to_string(), turn.to_string()], input, output)
            .map_err(RenderError::Engine)?;
        serde_json::from_str(&stdout)
            .map_err(|e| RenderError::engine(format!("Undecodable frame: {}", e)))
    }
}

const SPAWN_FAILURE: &str = "Failed to run";

/// Run `command` with extra `args`, feeding `stdin` if given, and return stdout.
fn run_command(command: &[String], args: &[String], stdin: Option<Vec<u8>>) -> Result<String, String> {
    let Some((program, leading)) = command.split_first() else {
        return Err(format!("{} an empty command", SPAWN_FAILURE));
    };
    tracing::debug!(program = %program, ?args, "Running engine command");

    let mut child = Command::new(program)
        .args(leading)
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("{} {}: {}", SPAWN_FAILURE, program, e))?;

    // Write stdin on a separate thread so a chatty child cannot deadlock us.
    let writer = match (stdin, child.stdin.take()) {
        (Some(bytes), Some(mut pipe)) => {
            Some(std::thread::spawn(move || pipe.write_all(&bytes)))
        }
        _ => None,
    };

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for {}: {}", program, e))?;

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("Engine command closed stdin early: {}", e),
            Err(_) => return Err(format!("Stdin writer for {} panicked", program)),
        }
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!(
            program = %program,
            status = %output.status,
            stderr = %stderr.trim(),
            "Engine command failed"
        );
        return Err(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        ));
    }

    String::from_utf8(output.stdout).map_err(|e| format!("{} wrote non-UTF-8 output: {}", program, e))
}
