//! Display implementations for error types

use super::types::Error;
use std::fmt;
use std::path::Path;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Launch { command, message } => {
                write!(f, "failed to launch '{command}': {message}")
            }
            Error::PhpWarning { file, message, .. } => {
                write_diagnostic(f, "warning", file.as_deref(), message)
            }
            Error::PhpError { file, message, .. } => {
                write_diagnostic(f, "error", file.as_deref(), message)
            }
            Error::PhpCore { message, .. } => write!(f, "{message}"),
            Error::FileWrite { path, source } => {
                write!(
                    f,
                    "error writing php temporary code snippet to '{}': {source}",
                    path.display()
                )
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
        }
    }
}

fn write_diagnostic(
    f: &mut fmt::Formatter<'_>,
    severity: &str,
    file: Option<&Path>,
    message: &str,
) -> fmt::Result {
    match file {
        Some(file) => write!(f, "php {severity} in '{}': {message}", file.display()),
        None => write!(f, "php {severity}: {message}"),
    }
}
