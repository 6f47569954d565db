/// Constants used throughout the phpexec codebase
// Interpreter flags
pub const PHP_FLAG_VERSION: &str = "-v";
pub const PHP_FLAG_INCLUDES: &str = "-d include_path";

// Default executable resolved through PATH
pub const DEFAULT_PHP_EXECUTABLE: &str = "php";

// Prefix written in front of every materialized snippet
pub const SNIPPET_PREAMBLE: &str = "<?php \n";

// Default snippet location below the system temp directory
pub const DEFAULT_SNIPPET_DIR: &str = "phpexec";
pub const DEFAULT_SNIPPET_FILE: &str = "snippet.php";

// Output markers printed by the interpreter for fatal diagnostics
pub const ERROR_IDENTIFIERS: &[&str] = &["Fatal error", "Error", "Parse error"];

// Output markers printed by the interpreter for non-fatal diagnostics
pub const WARNING_IDENTIFIERS: &[&str] = &["Warning", "Notice"];

// Include directives that keep a diagnostic visible when include errors are ignored
pub const INCLUDE_DIRECTIVES: &[&str] = &["require_once", "include_once"];

// Environment variable names
pub const PHPEXEC_EXECUTABLE_VAR: &str = "PHPEXEC_EXECUTABLE";
pub const PHPEXEC_PARAMETERS_VAR: &str = "PHPEXEC_PHP_PARAMETERS";
pub const PHPEXEC_IGNORE_INCLUDE_ERRORS_VAR: &str = "PHPEXEC_IGNORE_INCLUDE_ERRORS";
pub const PHPEXEC_LOG_OUTPUT_VAR: &str = "PHPEXEC_LOG_OUTPUT";
pub const PHPEXEC_TEMP_SCRIPT_VAR: &str = "PHPEXEC_TEMP_SCRIPT";
pub const PHPEXEC_LOG_VAR: &str = "PHPEXEC_LOG";
