//! jlink process execution
//!
//! Runs the assembled command to completion without a timeout, capturing
//! stdout and stderr separately, and turns the outcome into a result.

use crate::error::{JlinkwError, JlinkwResult, INCOMPATIBLE_JDK_HINT};
use crate::jlink::command::CommandLine;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// jlink output fragment reported when module versions don't match the tool
const ILLEGAL_ARGUMENT_MARKER: &str = "IllegalArgumentException";

/// Cooperative interruption flag shared by everything awaiting the build
#[derive(Debug, Clone)]
pub struct InterruptSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl InterruptSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Raise the flag; all current and future waiters observe it
    pub fn interrupt(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_interrupted(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the flag is raised
    pub async fn interrupted(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so waiting can't fail
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

impl Default for InterruptSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Exit code and captured output of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `-1` when terminated by a signal
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<std::process::Output> for ProcessOutcome {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Executes commands under an interruption signal
pub struct ProcessRunner {
    interrupt: InterruptSignal,
}

impl ProcessRunner {
    pub fn new(interrupt: InterruptSignal) -> Self {
        Self { interrupt }
    }

    /// Run the command and classify its outcome
    pub async fn run(&self, command: &CommandLine) -> JlinkwResult<ProcessOutcome> {
        let outcome = self.execute(command).await?;
        classify(outcome)
    }

    /// Run the command to completion without judging the exit code
    pub async fn execute(&self, command: &CommandLine) -> JlinkwResult<ProcessOutcome> {
        if self.interrupt.is_interrupted() {
            return Err(JlinkwError::Interrupted);
        }

        debug!("Executing: {}", command);

        let child = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| JlinkwError::launch(command.program(), e))?;

        tokio::select! {
            output = child.wait_with_output() => {
                let output = output.map_err(|e| {
                    JlinkwError::io(format!("waiting for {}", command.program()), e)
                })?;
                Ok(ProcessOutcome::from(output))
            }
            _ = self.interrupt.interrupted() => {
                // Dropping the wait future kills the child
                self.interrupt.interrupt();
                warn!("Execution interrupted: {}", command.program());
                Err(JlinkwError::Interrupted)
            }
        }
    }
}

/// Turn a finished process into success or a tool execution error.
///
/// With an empty stderr the stdout becomes the diagnostic, otherwise stdout
/// is logged and stderr is the diagnostic. Exit code 1 with an
/// `IllegalArgumentException` on stdout gets the JDK mismatch hint.
pub fn classify(outcome: ProcessOutcome) -> JlinkwResult<ProcessOutcome> {
    if outcome.success() {
        debug!("{}", outcome.stdout);
        return Ok(outcome);
    }

    let incompatible_jdk = outcome.code == 1 && outcome.stdout.contains(ILLEGAL_ARGUMENT_MARKER);

    let mut diagnostic = if outcome.stderr.is_empty() {
        outcome.stdout.trim_end().to_string()
    } else {
        info!("{}", outcome.stdout);
        outcome.stderr.trim_end().to_string()
    };

    if incompatible_jdk {
        error!("{}", INCOMPATIBLE_JDK_HINT);
        if !diagnostic.is_empty() {
            diagnostic.push('\n');
        }
        diagnostic.push_str(INCOMPATIBLE_JDK_HINT);
    }

    Err(JlinkwError::ToolExecution {
        code: outcome.code,
        diagnostic,
    })
}
