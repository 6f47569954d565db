//! Executable configuration for phpexec
//!
//! `ExecutableConfig` is the single source of truth for how the interpreter is
//! invoked. It is assembled once (defaults, then an optional JSON file, then
//! environment overrides, then explicit builder calls) and is immutable after
//! it has been handed to an invoker.

use crate::constants::{
    DEFAULT_PHP_EXECUTABLE, DEFAULT_SNIPPET_DIR, DEFAULT_SNIPPET_FILE,
    PHPEXEC_EXECUTABLE_VAR, PHPEXEC_IGNORE_INCLUDE_ERRORS_VAR, PHPEXEC_LOG_OUTPUT_VAR,
    PHPEXEC_PARAMETERS_VAR, PHPEXEC_TEMP_SCRIPT_VAR,
};
use crate::errors::{Error, Result, ResultExt};
use crate::types::EnvironmentVariables;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings for a single PHP executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutableConfig {
    /// Path (or PATH-resolved name) of the php binary
    pub executable: String,

    /// Parameters placed between the executable and the per-call arguments
    pub additional_php_parameters: Option<String>,

    /// Selects which classified lines are kept in the failure message
    pub ignore_include_errors: bool,

    /// Log interpreter stdout at info level instead of debug
    pub log_php_output: bool,

    /// Reusable file that code snippets are written to before execution
    pub temporary_script_file: PathBuf,

    /// Extra environment for the interpreter process
    pub env: EnvironmentVariables,

    /// Include path entries (accepted, not yet part of command construction)
    pub include_path: Vec<String>,

    /// `-d` defines (accepted, not yet part of command construction)
    pub php_defines: BTreeMap<String, String>,
}

impl Default for ExecutableConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_PHP_EXECUTABLE.to_string(),
            additional_php_parameters: None,
            ignore_include_errors: false,
            log_php_output: false,
            temporary_script_file: default_temporary_script_file(),
            env: EnvironmentVariables::new(),
            include_path: Vec::new(),
            php_defines: BTreeMap::new(),
        }
    }
}

impl ExecutableConfig {
    /// Start building a configuration from defaults
    #[must_use]
    pub fn builder() -> ExecutableConfigBuilder {
        ExecutableConfigBuilder::new()
    }

    /// Load a configuration from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read", e))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid configuration file '{}'", path.display()))
    }

    /// Overlay `PHPEXEC_*` environment variables on top of this configuration
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(executable) = lookup(PHPEXEC_EXECUTABLE_VAR) {
            self.executable = executable;
        }
        if let Some(parameters) = lookup(PHPEXEC_PARAMETERS_VAR) {
            self.additional_php_parameters = Some(parameters);
        }
        if let Some(value) = lookup(PHPEXEC_IGNORE_INCLUDE_ERRORS_VAR) {
            self.ignore_include_errors = parse_bool(PHPEXEC_IGNORE_INCLUDE_ERRORS_VAR, &value)?;
        }
        if let Some(value) = lookup(PHPEXEC_LOG_OUTPUT_VAR) {
            self.log_php_output = parse_bool(PHPEXEC_LOG_OUTPUT_VAR, &value)?;
        }
        if let Some(path) = lookup(PHPEXEC_TEMP_SCRIPT_VAR) {
            self.temporary_script_file = PathBuf::from(path);
        }
        Ok(self)
    }
}

fn parse_bool(variable: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::configuration(format!(
            "{variable} must be a boolean, got '{other}'"
        ))),
    }
}

fn default_temporary_script_file() -> PathBuf {
    std::env::temp_dir()
        .join(DEFAULT_SNIPPET_DIR)
        .join(DEFAULT_SNIPPET_FILE)
}

/// Fluent builder for [`ExecutableConfig`]
#[derive(Debug, Clone, Default)]
pub struct ExecutableConfigBuilder {
    config: ExecutableConfig,
}

impl ExecutableConfigBuilder {
    /// Create a builder seeded with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: ExecutableConfig) -> Self {
        Self { config }
    }

    /// Set the executable path
    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.config.executable = executable.into();
        self
    }

    /// Set the global parameter string
    pub fn additional_php_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.config.additional_php_parameters = Some(parameters.into());
        self
    }

    /// Set the include-ignore flag
    pub fn ignore_include_errors(mut self, ignore: bool) -> Self {
        self.config.ignore_include_errors = ignore;
        self
    }

    /// Set the output-echo flag
    pub fn log_php_output(mut self, log: bool) -> Self {
        self.config.log_php_output = log;
        self
    }

    /// Set the reusable snippet file
    pub fn temporary_script_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temporary_script_file = path.into();
        self
    }

    /// Add an environment variable for the interpreter process
    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.env.insert(key, value);
        self
    }

    /// Append an include path entry
    pub fn include_path(mut self, path: impl Into<String>) -> Self {
        self.config.include_path.push(path.into());
        self
    }

    /// Add a php define
    pub fn php_define(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.php_defines.insert(key.into(), value.into());
        self
    }

    /// Finish building
    pub fn build(self) -> ExecutableConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ExecutableConfig::default();
        assert_eq!(config.executable, "php");
        assert_eq!(config.additional_php_parameters, None);
        assert!(!config.ignore_include_errors);
        assert!(!config.log_php_output);
        assert!(config.temporary_script_file.ends_with("phpexec/snippet.php"));
    }

    #[test]
    fn test_builder() {
        let config = ExecutableConfig::builder()
            .executable("/usr/bin/php5")
            .additional_php_parameters("-n")
            .ignore_include_errors(true)
            .log_php_output(true)
            .temporary_script_file("/tmp/x/snippet.php")
            .env_var("PHPRC", "/etc")
            .include_path("/usr/share/pear")
            .php_define("memory_limit", "-1")
            .build();

        assert_eq!(config.executable, "/usr/bin/php5");
        assert_eq!(config.additional_php_parameters.as_deref(), Some("-n"));
        assert!(config.ignore_include_errors);
        assert!(config.log_php_output);
        assert_eq!(config.temporary_script_file, PathBuf::from("/tmp/x/snippet.php"));
        assert_eq!(config.env.get("PHPRC").map(String::as_str), Some("/etc"));
        assert_eq!(config.include_path, vec!["/usr/share/pear".to_string()]);
        assert_eq!(config.php_defines.get("memory_limit").map(String::as_str), Some("-1"));
    }

    #[test]
    fn test_overrides() {
        let config = ExecutableConfig::default()
            .apply_overrides(lookup_from(&[
                (PHPEXEC_EXECUTABLE_VAR, "/opt/php/bin/php"),
                (PHPEXEC_PARAMETERS_VAR, "-n -d short_open_tag=1"),
                (PHPEXEC_IGNORE_INCLUDE_ERRORS_VAR, "TRUE"),
                (PHPEXEC_LOG_OUTPUT_VAR, "1"),
                (PHPEXEC_TEMP_SCRIPT_VAR, "/var/tmp/s.php"),
            ]))
            .unwrap();

        assert_eq!(config.executable, "/opt/php/bin/php");
        assert_eq!(
            config.additional_php_parameters.as_deref(),
            Some("-n -d short_open_tag=1")
        );
        assert!(config.ignore_include_errors);
        assert!(config.log_php_output);
        assert_eq!(config.temporary_script_file, PathBuf::from("/var/tmp/s.php"));
    }

    #[test]
    fn test_override_rejects_bad_bool() {
        let err = ExecutableConfig::default()
            .apply_overrides(lookup_from(&[(PHPEXEC_LOG_OUTPUT_VAR, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains(PHPEXEC_LOG_OUTPUT_VAR));
    }

    #[test]
    #[serial]
    fn test_apply_env_overrides_reads_process_env() {
        std::env::set_var(PHPEXEC_EXECUTABLE_VAR, "php-from-env");
        let config = ExecutableConfig::default().apply_env_overrides();
        std::env::remove_var(PHPEXEC_EXECUTABLE_VAR);
        assert_eq!(config.unwrap().executable, "php-from-env");
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"executable": "/usr/local/bin/php", "ignore_include_errors": true, "php_defines": {{"error_reporting": "E_ALL"}}}}"#
        )
        .unwrap();

        let config = ExecutableConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.executable, "/usr/local/bin/php");
        assert!(config.ignore_include_errors);
        assert!(!config.log_php_output);
        assert_eq!(
            config.php_defines.get("error_reporting").map(String::as_str),
            Some("E_ALL")
        );
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = ExecutableConfig::from_json_file("/nonexistent/phpexec.json").unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = ExecutableConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().contains("invalid configuration file"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
