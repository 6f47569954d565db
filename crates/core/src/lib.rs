//! Core domain types, errors, configuration and constants for `phpexec`.
//!
//! This crate holds everything the invoker needs that is not process plumbing:
//! the failure taxonomy returned by every invocation, the immutable executable
//! configuration, and the small value types passed between layers.
//!
//! ## Key Components
//!
//! - **`errors`**: The `Error` enum and `Result` alias. Launch faults, the three
//!   diagnostic fault kinds raised from classified interpreter output, and the
//!   snippet file-write fault all live here.
//! - **`types`**: `CommandLine` and its argument/environment wrappers, and the
//!   `PhpVersion` generation enum with its fixed-offset version-line parser.
//! - **`config`**: `ExecutableConfig`, its builder, and the JSON/environment
//!   loaders.
//! - **`constants`**: Interpreter flags, classification markers and environment
//!   variable names.

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    config::{ExecutableConfig, ExecutableConfigBuilder},
    constants::*,
    errors::{Error, Result, ResultExt},
    types::*,
};
