//! Global console replacement through the `log` facade
//!
//! Installing a logger here binds its four standard methods process-wide:
//! facade records at `Error`, `Warn` and `Info` map one-to-one, and both
//! `Debug` and `Trace` map to the logger's `log` method. `table` and `dir`
//! deliberately stay off the global surface; callers wanting them keep a
//! handle to the logger itself.

use log::{Log, Metadata, Record};

use crate::error::ConsoleError;
use crate::logger::Logger;

struct ConsoleBridge {
    logger: Logger,
}

impl Log for ConsoleBridge {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        match record.level() {
            log::Level::Error => self.logger.error(*record.args()),
            log::Level::Warn => self.logger.warn(*record.args()),
            log::Level::Info => self.logger.info(*record.args()),
            log::Level::Debug | log::Level::Trace => self.logger.log(*record.args()),
        }
    }

    fn flush(&self) {}
}

/// Replace the process-wide console with `logger`.
///
/// Every facade record then runs the logger's full pipeline: formatter,
/// suppression, hooks and sinks, exactly as a direct call would. The
/// installed bridge holds its own clone; the caller's instance stays usable
/// and shares the same sinks.
///
/// Fails with [`ConsoleError::AlreadyInstalled`] when any global logger is
/// already registered.
pub fn replace_global_console(logger: Logger) -> Result<(), ConsoleError> {
    log::set_boxed_logger(Box::new(ConsoleBridge { logger }))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
