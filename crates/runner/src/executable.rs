//! The PHP executable invoker
//!
//! [`PhpExecutable`] composes command lines from its configuration, launches
//! them through a [`ProcessLauncher`], and layers output classification,
//! output capture, version probing and snippet execution on top.

use crate::classify::Classification;
use crate::launcher::{LineHandlers, OutputSink, ProcessLauncher, SystemLauncher};
use crate::snippet::{absolute_path, snippet_arguments, write_snippet};
use once_cell::sync::OnceCell;
use phpexec_core::{
    CommandLine, ExecutableConfig, PhpVersion, Result, ResultExt, PHP_FLAG_VERSION,
};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Raw outcome of a single unclassified invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A configured PHP interpreter.
///
/// Invocations are synchronous: each call blocks until the process exits and
/// all of its output has been delivered. The detected version is probed at
/// most once per instance. Snippets share one script file, so snippet runs on
/// the same instance must not overlap.
pub struct PhpExecutable<L = SystemLauncher> {
    config: ExecutableConfig,
    launcher: L,
    version: OnceCell<PhpVersion>,
}

impl PhpExecutable<SystemLauncher> {
    /// Create an executable that spawns real processes
    pub fn new(config: ExecutableConfig) -> Self {
        Self::with_launcher(config, SystemLauncher)
    }

    /// Create an executable for `path` with otherwise default settings
    pub fn from_executable(path: impl Into<String>) -> Self {
        Self::new(ExecutableConfig::builder().executable(path).build())
    }
}

impl<L: ProcessLauncher> PhpExecutable<L> {
    /// Create an executable with a custom launcher
    pub fn with_launcher(config: ExecutableConfig, launcher: L) -> Self {
        Self {
            config,
            launcher,
            version: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ExecutableConfig {
        &self.config
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Compose `executable [global parameters] arguments` as an argument vector
    pub fn command_line(&self, arguments: &str) -> Result<CommandLine> {
        // TODO: append include_path and php_defines here once callers stop passing their own -d flags
        let mut command =
            CommandLine::new(self.config.executable.as_str()).env(self.config.env.clone());
        if let Some(parameters) = &self.config.additional_php_parameters {
            command = command.args_from_str(parameters)?;
        }
        command.args_from_str(arguments)
    }

    /// Run php with `arguments`, streaming each output line to the handlers.
    ///
    /// Only launch failures are errors here; the exit code is returned as is.
    pub fn execute<O, E>(&self, arguments: &str, on_stdout: O, on_stderr: E) -> Result<i32>
    where
        O: FnMut(&str),
        E: FnMut(&str),
    {
        self.execute_with_sink(arguments, &mut LineHandlers::new(on_stdout, on_stderr))
    }

    fn execute_with_sink(&self, arguments: &str, sink: &mut dyn OutputSink) -> Result<i32> {
        let command = self.command_line(arguments)?;
        debug!("Executing {command}");
        self.launcher.launch(&command, sink)
    }

    /// Run php once and collect its exit code and full output without classification
    pub fn invoke(&self, arguments: &str) -> Result<Invocation> {
        let mut stdout = String::new();
        let mut stderr = String::new();
        let exit_code = self.execute(
            arguments,
            |line| push_line(&mut stdout, line),
            |line| push_line(&mut stderr, line),
        )?;
        Ok(Invocation {
            exit_code,
            stdout,
            stderr,
        })
    }

    /// Run php and fail when its exit code or output reports trouble.
    ///
    /// `file` is the source file being processed, attached to diagnostic
    /// errors. Stdout lines are still streamed to `on_stdout`.
    pub fn execute_checked<F>(&self, arguments: &str, file: Option<&Path>, on_stdout: F) -> Result<i32>
    where
        F: FnMut(&str),
    {
        let mut sink = CheckedSink {
            classification: Classification::new(self.config.ignore_include_errors),
            echo: self.config.log_php_output,
            stdout: on_stdout,
        };
        let exit_code = self.execute_with_sink(arguments, &mut sink)?;
        sink.classification.finish(arguments, exit_code, file)
    }

    /// Run php checked and return its stdout, one `\n`-terminated line per line.
    ///
    /// On failure the stdout captured so far is appended to the error.
    pub fn execute_captured(&self, arguments: &str, file: Option<&Path>) -> Result<String> {
        let mut output = String::new();
        let result = self.execute_checked(arguments, file, |line| push_line(&mut output, line));
        result.with_output(&output)?;
        Ok(output)
    }

    /// The interpreter generation, probed with `php -v` on first use.
    ///
    /// A successful probe is cached for the lifetime of this instance, including
    /// `Unknown` when the binary printed no `PHP` line. Failed probes are retried.
    pub fn version(&self) -> Result<PhpVersion> {
        self.version
            .get_or_try_init(|| self.probe_version())
            .copied()
    }

    fn probe_version(&self) -> Result<PhpVersion> {
        let mut detected = None;
        self.execute_checked(PHP_FLAG_VERSION, None, |line| {
            if detected.is_some() || !line.starts_with("PHP") {
                return;
            }
            let version = PhpVersion::from_version_line(line);
            match version {
                PhpVersion::Php6 => warn!("PHP6 is not supported yet!"),
                PhpVersion::Php4 => warn!("PHP4 will not be supported anymore!"),
                PhpVersion::Unrecognized => error!("Cannot find out PHP version: {line}"),
                PhpVersion::Php5 | PhpVersion::Unknown => {}
            }
            detected = Some(version);
        })?;

        let version = detected.unwrap_or_else(|| {
            error!("Cannot find out PHP version: no version line in output");
            PhpVersion::Unknown
        });
        debug!("PHP version: {version}");
        Ok(version)
    }

    /// Run a code snippet and return its output
    pub fn execute_code(&self, arguments: &str, code: &str) -> Result<String> {
        self.execute_code_with_args(arguments, code, None)
    }

    /// Run a code snippet with script arguments and return its output.
    ///
    /// The code is written behind `<?php ` to the configured temporary script
    /// file, which is then run as `[arguments ]"<script>"[ code_arguments]`.
    pub fn execute_code_with_args(
        &self,
        arguments: &str,
        code: &str,
        code_arguments: Option<&str>,
    ) -> Result<String> {
        let snippet = absolute_path(&self.config.temporary_script_file)?;
        write_snippet(&snippet, code)?;
        let command = snippet_arguments(arguments, &snippet, code_arguments);
        self.execute_captured(&command, Some(&snippet))
    }
}

struct CheckedSink<F> {
    classification: Classification,
    echo: bool,
    stdout: F,
}

impl<F: FnMut(&str)> OutputSink for CheckedSink<F> {
    fn on_stdout(&mut self, line: &str) {
        if self.echo {
            info!("php.out: {line}");
        } else {
            debug!("php.out: {line}");
        }
        (self.stdout)(line);
        self.classification.observe_stdout(line);
    }

    fn on_stderr(&mut self, line: &str) {
        debug!("php.err: {line}");
        self.classification.observe_stderr(line);
    }
}

fn push_line(buffer: &mut String, line: &str) {
    buffer.push_str(line);
    buffer.push('\n');
}
