use phpexec_core::PHPEXEC_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// Log lines go to stderr so that php output on stdout stays pipeable.
/// The filter is read from `PHPEXEC_LOG` and defaults to `info`.
pub fn init() -> eyre::Result<()> {
    let filter = EnvFilter::try_from_env(PHPEXEC_LOG_VAR).or_else(|_| EnvFilter::try_new("info"))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
