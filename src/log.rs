//! Logging.
//!
//! All diagnostic output is done via the `log` facade, never to stderr
//! directly. The report output of the listener and the client goes to
//! stdout and is not affected by logging at all.

use std::io;
use log::LevelFilter;
use crate::config::Config;
use crate::error::Failed;


//------------ Logger --------------------------------------------------------

/// Format and write log messages.
pub struct Logger;

impl Logger {
    /// Initialize logging.
    ///
    /// It is important to initialize logging before doing anything else
    /// that may result in diagnostic output. This function sets a maximum
    /// log level of `warn`, leading only printing important information,
    /// and directs all logging to stderr.
    pub fn init() -> Result<(), Failed> {
        let res = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {}", record.level(), message
                ))
            })
            .level(LevelFilter::Trace)
            .chain(io::stderr())
            .apply();
        if let Err(err) = res {
            eprintln!("Failed to initialize logger: {}.\nAborting.", err);
            return Err(Failed)
        }
        log::set_max_level(LevelFilter::Warn);
        Ok(())
    }

    /// Switches logging to the configured level.
    ///
    /// Once the configuration has been successfully loaded, logging should
    /// be switched to whatever the user asked for via this method.
    pub fn switch_logging(config: &Config) {
        log::set_max_level(config.log_level);
    }
}
