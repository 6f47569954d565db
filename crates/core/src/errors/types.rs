//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for phpexec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for phpexec operations using thiserror
///
/// The three `Php*` variants are diagnostic faults: the interpreter ran but its
/// output (or exit code) reported trouble. They carry the formatted failure
/// message and any stdout captured before the failure surfaced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The interpreter could not be started or the launch layer itself failed
    Launch { command: String, message: String },

    /// Classified output contained a warning marker (possibly alongside error markers)
    PhpWarning {
        file: Option<PathBuf>,
        message: String,
        output: String,
    },

    /// Classified output contained an error marker and no warning marker
    PhpError {
        file: Option<PathBuf>,
        message: String,
        output: String,
    },

    /// Non-zero exit without any classified marker line
    PhpCore { message: String, output: String },

    /// The snippet file could not be created or written
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    Configuration { message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}
