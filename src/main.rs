//! The hellohttp binary.

use std::process::exit;
use clap::{Command, crate_authors, crate_version};
use hellohttp::{Config, ExitError, Operation};
use hellohttp::log::Logger;

// Since `main` with a result currently insists on printing a message, but
// in our case we only get an `ExitError` if all is said and done, we make our
// own, more quiet version.
fn _main() -> Result<(), ExitError> {
    Logger::init()?;
    let matches = Operation::config_args(
        Command::new("hellohttp")
            .version(crate_version!())
            .author(crate_authors!())
            .about("sends one request to its own in-process HTTP server")
    ).get_matches();
    let config = Config::from_arg_matches(&matches)?;
    Logger::switch_logging(&config);
    Operation::new(config).run()?;
    Ok(())
}

fn main() {
    match _main() {
        Ok(_) => exit(0),
        Err(err) => exit(err.exit_code()),
    }
}
