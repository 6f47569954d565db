use crate::Cli;
use clap::Subcommand;
use phpexec_core::{CommandArguments, ExecutableConfig, ExecutableConfigBuilder};
use phpexec_runner::{include_path_parameter, PhpExecutable};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run php with the given arguments and print its output
    Exec {
        /// Source file being processed, reported with diagnostics
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Arguments passed to php
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },

    /// Print the detected interpreter generation
    Version,

    /// Run a code snippet and print its output
    Eval {
        /// PHP code, without the opening tag
        code: String,

        /// Arguments placed before the snippet path
        #[arg(long, allow_hyphen_values = true)]
        php_args: Option<String>,

        /// Arguments passed to the snippet
        #[arg(long, allow_hyphen_values = true)]
        script_args: Option<String>,
    },

    /// Print the include_path flag for the given directories
    IncludePath {
        /// Include path entries, in search order
        paths: Vec<String>,
    },
}

/// Layer defaults, the config file, `PHPEXEC_*` variables and flags
pub fn load_config(cli: &Cli) -> eyre::Result<ExecutableConfig> {
    let base = match &cli.config {
        Some(path) => ExecutableConfig::from_json_file(path)?,
        None => ExecutableConfig::default(),
    };
    let mut builder = ExecutableConfigBuilder::from_config(base.apply_env_overrides()?);

    if let Some(executable) = &cli.executable {
        builder = builder.executable(executable);
    }
    if let Some(parameters) = &cli.php_parameters {
        builder = builder.additional_php_parameters(parameters);
    }
    if cli.ignore_include_errors {
        builder = builder.ignore_include_errors(true);
    }
    if cli.log_output {
        builder = builder.log_php_output(true);
    }
    if let Some(path) = &cli.temp_script {
        builder = builder.temporary_script_file(path);
    }
    Ok(builder.build())
}

impl Commands {
    pub fn execute(self, config: ExecutableConfig) -> eyre::Result<()> {
        match self {
            Commands::Exec { file, args } => {
                let mut words = CommandArguments::new();
                words.extend(args);
                let arguments = words.join();
                let php = PhpExecutable::new(config);
                let output = php.execute_captured(&arguments, file.as_deref())?;
                print!("{output}");
            }
            Commands::Version => {
                let php = PhpExecutable::new(config);
                println!("{}", php.version()?);
            }
            Commands::Eval {
                code,
                php_args,
                script_args,
            } => {
                let php = PhpExecutable::new(config);
                let output = php.execute_code_with_args(
                    php_args.as_deref().unwrap_or_default(),
                    &code,
                    script_args.as_deref(),
                )?;
                print!("{output}");
            }
            Commands::IncludePath { paths } => {
                println!("{}", include_path_parameter(&paths));
            }
        }
        Ok(())
    }
}
