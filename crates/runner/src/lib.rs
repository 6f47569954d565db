//! Checked invocation of the PHP interpreter.
//!
//! This crate turns "run php" into an operation with a classified result:
//! the interpreter's output is scanned line by line for `Fatal error:`,
//! `Warning:` and friends, and trouble is raised as a typed error even when
//! the process exits 0.
//!
//! ## Key Components
//!
//! - **`executable`**: `PhpExecutable`, the invoker. Plain, checked and
//!   capturing invocations, version probing and snippet execution.
//! - **`launcher`**: The `ProcessLauncher` seam and the `std::process` backed
//!   `SystemLauncher` that streams stdout/stderr lines as they arrive.
//! - **`classify`**: Line markers and the per-invocation `Classification`.
//! - **`snippet`**: Writing inline code to the reusable script file.
//! - **`include_path`**: The `-d include_path="..."` flag formatter.
//! - **`testing`**: `ScriptedLauncher`, a deterministic launcher for tests.

pub mod classify;
pub mod executable;
pub mod include_path;
pub mod launcher;
pub mod snippet;
pub mod testing;

pub use classify::{classify_line, is_error, is_warning, Classification, LineSeverity};
pub use executable::{Invocation, PhpExecutable};
pub use include_path::{include_path_parameter, include_path_parameter_with_separator, PATH_SEPARATOR};
pub use launcher::{LineHandlers, OutputSink, ProcessLauncher, SystemLauncher};
pub use phpexec_core::{Error, ExecutableConfig, PhpVersion, Result};
