//! Scripted launcher for exercising the invoker without a real interpreter
//!
//! Responses are keyed by the argument vector (joined with single spaces) and
//! replayed deterministically: all stdout lines first, then all stderr lines.

use crate::launcher::{OutputSink, ProcessLauncher};
use parking_lot::Mutex;
use phpexec_core::{CommandLine, Error, Result};
use std::collections::HashMap;

/// A canned process outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedResponse {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub exit_code: i32,
}

impl ScriptedResponse {
    /// Successful run printing `lines` to stdout
    pub fn ok<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stdout: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the stderr lines
    #[must_use]
    pub fn with_stderr<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stderr = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the exit code
    #[must_use]
    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }
}

/// Launcher that replays scripted responses and records every command it sees
#[derive(Debug, Default)]
pub struct ScriptedLauncher {
    responses: Mutex<HashMap<String, ScriptedResponse>>,
    fallback: Mutex<Option<ScriptedResponse>>,
    invocations: Mutex<Vec<CommandLine>>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for an exact argument vector, e.g. `["-n", "-v"]`
    pub fn respond<S: AsRef<str>>(&self, args: &[S], response: ScriptedResponse) {
        let key = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        self.responses.lock().insert(key, response);
    }

    /// Script the response for any argument vector without an exact entry
    pub fn respond_to_any(&self, response: ScriptedResponse) {
        *self.fallback.lock() = Some(response);
    }

    /// Every command launched so far, in order
    pub fn invocations(&self) -> Vec<CommandLine> {
        self.invocations.lock().clone()
    }

    /// Number of commands launched so far
    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().len()
    }
}

impl ProcessLauncher for ScriptedLauncher {
    fn launch(&self, command: &CommandLine, sink: &mut dyn OutputSink) -> Result<i32> {
        self.invocations.lock().push(command.clone());

        let key = command.args.as_slice().join(" ");
        let response = self
            .responses
            .lock()
            .get(&key)
            .cloned()
            .or_else(|| self.fallback.lock().clone())
            .ok_or_else(|| {
                Error::launch(command.to_string(), "no scripted response for command")
            })?;

        for line in &response.stdout {
            sink.on_stdout(line);
        }
        for line in &response.stderr {
            sink.on_stderr(line);
        }
        Ok(response.exit_code)
    }
}
