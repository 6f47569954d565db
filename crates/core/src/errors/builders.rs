//! Builder methods for creating errors with context

use super::types::Error;
use std::path::{Path, PathBuf};

impl Error {
    /// Create a launch error for a command that could not be started
    #[must_use]
    pub fn launch(command: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Launch {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a warning diagnostic raised from classified interpreter output
    #[must_use]
    pub fn php_warning(file: Option<&Path>, message: impl Into<String>) -> Self {
        Error::PhpWarning {
            file: file.map(Path::to_path_buf),
            message: message.into(),
            output: String::new(),
        }
    }

    /// Create an error diagnostic raised from classified interpreter output
    #[must_use]
    pub fn php_error(file: Option<&Path>, message: impl Into<String>) -> Self {
        Error::PhpError {
            file: file.map(Path::to_path_buf),
            message: message.into(),
            output: String::new(),
        }
    }

    /// Create a generic diagnostic for a failing exit code without marker lines
    #[must_use]
    pub fn php_core(message: impl Into<String>) -> Self {
        Error::PhpCore {
            message: message.into(),
            output: String::new(),
        }
    }

    /// Create a snippet file-write error
    #[must_use]
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Append captured interpreter output to a diagnostic error.
    ///
    /// Launch, file and configuration errors have no output slot and are left untouched.
    pub fn append_output(&mut self, captured: &str) {
        match self {
            Error::PhpWarning { output, .. }
            | Error::PhpError { output, .. }
            | Error::PhpCore { output, .. } => output.push_str(captured),
            _ => {}
        }
    }

    /// Interpreter output attached to a diagnostic error
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Error::PhpWarning { output, .. }
            | Error::PhpError { output, .. }
            | Error::PhpCore { output, .. } => Some(output),
            _ => None,
        }
    }

    /// The source file hint the failing invocation was processing, if any
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        match self {
            Error::PhpWarning { file, .. } | Error::PhpError { file, .. } => file.as_deref(),
            Error::FileWrite { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the error was raised from interpreter output rather than from launching it
    #[must_use]
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Error::PhpWarning { .. } | Error::PhpError { .. } | Error::PhpCore { .. }
        )
    }
}
