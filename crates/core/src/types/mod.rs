//! Core domain types for `phpexec`.
//!
//! ## Organization
//!
//! - **`commands`**: Argument vectors and the `CommandLine` handed to a launcher
//! - **`environment`**: Environment variables passed to the interpreter process
//! - **`version`**: Interpreter generation detection

pub mod commands;
pub mod environment;
pub mod version;

pub use commands::*;
pub use environment::*;
pub use version::*;
