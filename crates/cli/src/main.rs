use clap::Parser;
use std::path::PathBuf;

mod commands;
mod logging;

use commands::Commands;

#[derive(Parser)]
#[command(name = "phpexec")]
#[command(about = "Run the PHP interpreter with checked, classified output", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// PHP executable to run
    #[arg(long, global = true)]
    executable: Option<String>,

    /// Parameters passed to php before every call's arguments
    #[arg(long, global = true, allow_hyphen_values = true)]
    php_parameters: Option<String>,

    /// Keep only include_once/require_once diagnostics in failure messages
    #[arg(long, global = true)]
    ignore_include_errors: bool,

    /// Log php output at info level
    #[arg(long, global = true)]
    log_output: bool,

    /// File used to materialize code snippets
    #[arg(long, global = true, value_name = "FILE")]
    temp_script: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init()?;

    let config = commands::load_config(&cli)?;
    tracing::debug!("Using php executable {}", config.executable);
    cli.command.execute(config)
}
