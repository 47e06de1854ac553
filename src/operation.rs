//! What the program does.
//!
//! There is only one operation: start the listener in the background, wait
//! a little, send one request to it and report the response.

use std::io::{self, Write};
use std::thread;
use clap::Command;
use log::{error, info};
use tokio::runtime::Runtime;
use crate::client::{Exchange, HttpClient};
use crate::config::Config;
use crate::error::{ExitError, Failed};
use crate::http::http_listener;


//------------ Operation -----------------------------------------------------

/// The operation to run.
#[derive(Clone, Debug)]
pub struct Operation {
    config: Config,
}

impl Operation {
    /// Adds the command line arguments of the operation to a clap command.
    pub fn config_args(app: Command) -> Command {
        Config::config_args(app)
    }

    /// Creates the operation from a configuration.
    pub fn new(config: Config) -> Self {
        Operation { config }
    }

    /// Returns a reference to the config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the operation.
    ///
    /// Returns the exchange with the listener after printing it to stdout.
    /// The listener keeps running on its own thread until the process
    /// exits.
    pub fn run(&self) -> Result<Exchange, ExitError> {
        let (addr, listener) = http_listener(&self.config)?;
        let runtime = runtime()?;
        if let Err(err) = thread::Builder::new()
            .name("http-listener".into())
            .spawn(move || runtime.block_on(listener))
        {
            error!("Fatal: failed to start HTTP listener thread: {}", err);
            return Err(ExitError::Generic)
        }
        info!("Listening for HTTP on {}.", addr);

        thread::sleep(self.config.startup_delay);

        let client = HttpClient::new(&self.config)?;
        let exchange = client.exchange(client.request_url(addr.port())?)?;
        print_exchange(&exchange)?;
        Ok(exchange)
    }
}


//------------ Helper Functions ----------------------------------------------

/// Returns a Tokio runtime for the listener.
fn runtime() -> Result<Runtime, Failed> {
    Runtime::new().map_err(|err| {
        error!("Failed to create runtime: {}", err);
        Failed
    })
}

/// Writes the outcome of the exchange to stdout.
fn print_exchange(exchange: &Exchange) -> Result<(), Failed> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    write!(stdout, "{}", exchange).and_then(|_| stdout.flush()).map_err(
        |err| {
            error!("Failed to write output: {}", err);
            Failed
        }
    )
}


//============ Tests =========================================================
