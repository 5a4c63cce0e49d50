use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Parse a tracing level filter such as `info` or `ford_settings=trace,warn`.
pub fn parse_level_filter(option_name: &str, filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to parse {} as a level filter: {}", option_name, filter))
}

/// Installs the global tracing subscriber: a console layer on stderr and, if
/// `log_file_output_directory` is given, a plain-text file layer as well.
///
/// The returned guard flushes the log file when dropped, so keep it alive
/// until the program exits.
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: Option<&Path>,
    log_file_name: &str,
) -> Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_level_filter);


    let (file_layer, guard) = match log_file_output_directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to create missing log file directory at {}.",
                        directory.display()
                    )
                })?;

            let file_appender = tracing_appender::rolling::never(directory, log_file_name);
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_appender)
                .with_filter(log_file_level_filter);

            (Some(file_layer), Some(guard))
        }
        None => (None, None),
    };


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install the tracing subscriber.")?;

    Ok(guard)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filters_are_validated() {
        assert!(parse_level_filter("console-log-filter", "info").is_ok());
        assert!(parse_level_filter("console-log-filter", "ford_settings=trace,warn").is_ok());

        let error = parse_level_filter("console-log-filter", "ford_settings=loud").unwrap_err();
        assert!(error.to_string().contains("console-log-filter"));
    }
}
