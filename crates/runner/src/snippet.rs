//! Materializing inline code snippets to the reusable script file

use phpexec_core::{Error, Result, SNIPPET_PREAMBLE};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `code` behind the php open tag to `path`, replacing any previous snippet.
///
/// Parent directories are created on demand. The path is reused for every
/// snippet, so concurrent snippet runs against the same path must be
/// serialized by the caller.
pub fn write_snippet(path: &Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::file_write(path, e))?;
    }

    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::file_write(path, e)),
    }

    let mut contents = String::with_capacity(SNIPPET_PREAMBLE.len() + code.len());
    contents.push_str(SNIPPET_PREAMBLE);
    contents.push_str(code);
    fs::write(path, contents).map_err(|e| Error::file_write(path, e))
}

/// Resolve `path` against the current directory when it is relative
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| Error::file_write(path, e))
}

/// Compose `[arguments ]"<script>"[ code_arguments]`, skipping empty parts
#[must_use]
pub fn snippet_arguments(arguments: &str, script: &Path, code_arguments: Option<&str>) -> String {
    let mut command = String::new();
    if !arguments.is_empty() {
        command.push_str(arguments);
        command.push(' ');
    }
    command.push('"');
    command.push_str(&script.to_string_lossy());
    command.push('"');
    if let Some(extra) = code_arguments.filter(|extra| !extra.is_empty()) {
        command.push(' ');
        command.push_str(extra);
    }
    command
}
