//! Classification of interpreter output lines
//!
//! PHP commonly exits 0 while still printing fatal diagnostics, so a checked
//! invocation decides success from the text it saw as well as the exit code.
//! A [`Classification`] is created per invocation and consumed when the
//! process exits; nothing here is shared between calls.

use phpexec_core::{Error, Result, ERROR_IDENTIFIERS, INCLUDE_DIRECTIVES, WARNING_IDENTIFIERS};
use std::path::Path;

/// Severity of a single output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSeverity {
    Error,
    Warning,
    Plain,
}

/// Classify one output line by its leading marker
#[must_use]
pub fn classify_line(line: &str) -> LineSeverity {
    if is_error(line) {
        LineSeverity::Error
    } else if is_warning(line) {
        LineSeverity::Warning
    } else {
        LineSeverity::Plain
    }
}

/// Whether the trimmed line starts with an error marker and a colon,
/// plain (`Fatal error:`) or bold-wrapped (`<b>Fatal error</b>:`)
#[must_use]
pub fn is_error(line: &str) -> bool {
    starts_with_marker(line, ERROR_IDENTIFIERS)
}

/// Whether the trimmed line starts with a warning marker and a colon
#[must_use]
pub fn is_warning(line: &str) -> bool {
    starts_with_marker(line, WARNING_IDENTIFIERS)
}

fn starts_with_marker(line: &str, markers: &[&str]) -> bool {
    let trimmed = line.trim();
    markers.iter().any(|marker| {
        strip_colon(trimmed.strip_prefix(marker))
            || strip_colon(
                trimmed
                    .strip_prefix("<b>")
                    .and_then(|rest| rest.strip_prefix(marker))
                    .and_then(|rest| rest.strip_prefix("</b>")),
            )
    })
}

fn strip_colon(rest: Option<&str>) -> bool {
    rest.is_some_and(|rest| rest.starts_with(':'))
}

fn mentions_include(line: &str) -> bool {
    INCLUDE_DIRECTIVES
        .iter()
        .any(|directive| line.contains(directive))
}

/// Per-invocation classification state.
#[derive(Debug, Default)]
pub struct Classification {
    ignore_include_errors: bool,
    error_seen: bool,
    warning_seen: bool,
    diagnostics: String,
}

impl Classification {
    #[must_use]
    pub fn new(ignore_include_errors: bool) -> Self {
        Self {
            ignore_include_errors,
            ..Self::default()
        }
    }

    /// Feed one stdout line.
    ///
    /// Classified lines always latch their flag. With `ignore_include_errors`
    /// on, only classified lines that mention `require_once` or
    /// `include_once` are kept in the diagnostic text.
    pub fn observe_stdout(&mut self, line: &str) {
        let severity = classify_line(line);
        if severity == LineSeverity::Plain {
            return;
        }

        if !self.ignore_include_errors || mentions_include(line) {
            self.push_diagnostic(line);
        }

        match severity {
            LineSeverity::Error => self.error_seen = true,
            LineSeverity::Warning => self.warning_seen = true,
            LineSeverity::Plain => {}
        }
    }

    /// Feed one stderr line; anything on stderr is an error
    pub fn observe_stderr(&mut self, line: &str) {
        self.push_diagnostic(line);
        self.error_seen = true;
    }

    fn push_diagnostic(&mut self, line: &str) {
        self.diagnostics.push_str(line);
        self.diagnostics.push('\n');
    }

    #[must_use]
    pub fn error_seen(&self) -> bool {
        self.error_seen
    }

    #[must_use]
    pub fn warning_seen(&self) -> bool {
        self.warning_seen
    }

    /// Diagnostic text accumulated so far, one line per entry
    #[must_use]
    pub fn diagnostics(&self) -> &str {
        &self.diagnostics
    }

    /// Decide the outcome once the process has exited.
    ///
    /// Success requires exit code 0 and no latched flag. A latched warning
    /// wins over a latched error when picking the fault kind.
    pub fn finish(self, arguments: &str, exit_code: i32, file: Option<&Path>) -> Result<i32> {
        if exit_code == 0 && !self.error_seen && !self.warning_seen {
            return Ok(exit_code);
        }

        let mut message =
            format!("Failed to execute PHP with arguments '{arguments}' [Return: {exit_code}]");
        if !self.diagnostics.is_empty() {
            message.push_str(":\n");
            message.push_str(&self.diagnostics);
        }

        // TODO: report errors ahead of warnings once callers no longer match on PhpWarning for mixed output
        if self.warning_seen {
            Err(Error::php_warning(file, message))
        } else if self.error_seen {
            Err(Error::php_error(file, message))
        } else {
            Err(Error::php_core(message))
        }
    }
}
