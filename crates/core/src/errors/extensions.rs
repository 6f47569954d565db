//! Result extensions used on the invocation and configuration paths

use super::types::{Error, Result};

/// Extension trait for enriching failed Results without losing their variant
pub trait ResultExt<T> {
    /// Attach captured interpreter stdout to a diagnostic failure.
    ///
    /// Non-diagnostic errors pass through unchanged.
    fn with_output(self, captured: &str) -> Result<T>;

    /// Prefix the error message with lazily built context, keeping the source error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_output(self, captured: &str) -> Result<T> {
        self.map_err(|e| {
            let mut error: Error = e.into();
            error.append_output(captured);
            error
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let error: Error = e.into();
            error.context(f())
        })
    }
}

impl Error {
    /// Prefix the human-readable message of this error with `context`.
    ///
    /// Diagnostic and file errors already name their arguments and paths and
    /// are returned unchanged.
    #[must_use]
    pub fn context(mut self, context: impl AsRef<str>) -> Self {
        match &mut self {
            Error::Launch { message, .. }
            | Error::Configuration { message }
            | Error::Json { message, .. } => {
                *message = format!("{}: {message}", context.as_ref());
            }
            _ => {}
        }
        self
    }
}
