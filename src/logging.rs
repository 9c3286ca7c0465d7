use flexi_logger::{Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming};
use std::path::Path;

/// Starts the global logger. `RUST_LOG` overrides `default_level`.
///
/// With a `log_dir`, output goes to rotating files in that directory
/// instead of stderr. Keep the returned handle alive for the whole run.
pub fn setup_logging(
    default_level: &str,
    log_dir: Option<&Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(default_level)?;
    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .format(flexi_logger::opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(7),
            )
            .start(),
        None => logger.format(flexi_logger::colored_default_format).start(),
    }
}
