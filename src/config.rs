//! Configuration.
//!
//! This module primarily contains the type [`Config`] that holds all the
//! configuration used by the program. It is built from its defaults and
//! then adjusted by command line options.

use std::net::SocketAddr;
use std::time::Duration;
use clap::{Args, ArgAction, ArgMatches, Command, FromArgMatches};
use log::{LevelFilter, error};
use crate::error::Failed;


//------------ Defaults for Some Values --------------------------------------

/// The default port for the HTTP listener.
pub const DEFAULT_PORT: u16 = 3333;

/// The default host the client connects to.
const DEFAULT_HOST: &str = "localhost";

/// The default value of the `id` query parameter sent by the client.
const DEFAULT_ID: &str = "1234";

/// The default JSON body sent by the client.
pub const DEFAULT_MESSAGE: &str = r#"{"client_message": "hello, server!"}"#;

/// The default time to wait before the client sends its request.
const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(100);

/// The default timeout for the client’s request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);


//------------ Config --------------------------------------------------------

/// Configuration.
///
/// The configuration covers both the listener and the client side. Its
/// defaults reproduce the fixed exchange: a listener on all interfaces at
/// port 3333 and a client POSTing a small JSON message to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The address the HTTP listener binds to.
    pub listen: SocketAddr,

    /// The host name the client connects to.
    pub host: String,

    /// The value of the `id` query parameter.
    pub id: String,

    /// The request body.
    pub message: String,

    /// How long the client waits before sending its request.
    pub startup_delay: Duration,

    /// The timeout for the whole client request.
    pub timeout: Duration,

    /// The log levels to be logged.
    pub log_level: LevelFilter,
}

impl Config {
    /// Adds the config arguments to a clap command.
    ///
    /// The function follows clap’s builder pattern: it takes a command,
    /// adds a bunch of arguments to it and returns it at the end.
    pub fn config_args(app: Command) -> Command {
        ConfigArgs::augment_args(app)
    }

    /// Creates a configuration from command line matches.
    pub fn from_arg_matches(matches: &ArgMatches) -> Result<Self, Failed> {
        let mut res = Self::default();
        res.apply_arg_matches(matches)?;
        Ok(res)
    }

    /// Applies the command line arguments to a configuration.
    fn apply_arg_matches(
        &mut self,
        matches: &ArgMatches,
    ) -> Result<(), Failed> {
        let args = match ConfigArgs::from_arg_matches(matches) {
            Ok(args) => args,
            Err(err) => {
                error!("Invalid command line arguments: {}", err);
                return Err(Failed)
            }
        };

        if let Some(listen) = args.listen {
            self.listen = listen
        }
        if let Some(host) = args.host {
            if host.is_empty() {
                error!("Invalid value for host: must not be empty.");
                return Err(Failed)
            }
            self.host = host
        }
        if let Some(id) = args.id {
            self.id = id
        }
        if let Some(message) = args.message {
            self.message = message
        }
        if let Some(delay) = args.startup_delay {
            self.startup_delay = Duration::from_millis(delay)
        }
        if let Some(timeout) = args.timeout {
            if timeout == 0 {
                error!("Invalid value for timeout: must be positive.");
                return Err(Failed)
            }
            self.timeout = Duration::from_secs(timeout)
        }

        if args.verbose > 1 {
            self.log_level = LevelFilter::Debug
        }
        else if args.verbose == 1 {
            self.log_level = LevelFilter::Info
        }
        else if args.quiet > 1 {
            self.log_level = LevelFilter::Off
        }
        else if args.quiet == 1 {
            self.log_level = LevelFilter::Error
        }

        Ok(())
    }
}


//--- Default

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            host: DEFAULT_HOST.into(),
            id: DEFAULT_ID.into(),
            message: DEFAULT_MESSAGE.into(),
            startup_delay: DEFAULT_STARTUP_DELAY,
            timeout: DEFAULT_TIMEOUT,
            log_level: LevelFilter::Warn,
        }
    }
}


//------------ ConfigArgs ----------------------------------------------------

/// The command line arguments.
#[derive(Clone, Debug, Args)]
struct ConfigArgs {
    /// Listen on address/port for HTTP [default 0.0.0.0:3333]
    #[arg(long, value_name = "ADDR:PORT")]
    listen: Option<SocketAddr>,

    /// Host name the client connects to [default localhost]
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Value of the id query parameter [default 1234]
    #[arg(long, value_name = "ID")]
    id: Option<String>,

    /// JSON body of the request
    #[arg(long, value_name = "TEXT")]
    message: Option<String>,

    /// Wait before sending the request [default 100]
    #[arg(long, value_name = "MILLIS")]
    startup_delay: Option<u64>,

    /// Timeout for the request in seconds [default 30]
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Log more information, twice for even more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log less information, twice for no information
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn process_args(args: &[&str]) -> Result<Config, Failed> {
        Config::from_arg_matches(
            &Config::config_args(Command::new("hellohttp"))
                .get_matches_from(args)
        )
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.listen, "0.0.0.0:3333".parse().unwrap());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.id, "1234");
        assert_eq!(
            config.message, r#"{"client_message": "hello, server!"}"#
        );
        assert_eq!(config.startup_delay, Duration::from_millis(100));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn no_args() {
        assert_eq!(process_args(&["hellohttp"]).unwrap(), Config::default());
    }

    #[test]
    fn basic_args() {
        let config = process_args(&[
            "hellohttp", "--listen", "127.0.0.1:8080",
            "--host", "127.0.0.1", "--id", "99",
            "--message", "{}", "--startup-delay", "5", "--timeout", "2",
        ]).unwrap();
        assert_eq!(config.listen, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.id, "99");
        assert_eq!(config.message, "{}");
        assert_eq!(config.startup_delay, Duration::from_millis(5));
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn bad_args() {
        assert!(process_args(&["hellohttp", "--timeout", "0"]).is_err());
        assert!(process_args(&["hellohttp", "--host", ""]).is_err());
        assert!(
            Config::config_args(Command::new("hellohttp"))
                .try_get_matches_from(["hellohttp", "--listen", "nope"])
                .is_err()
        );
    }

    #[test]
    fn verbosity() {
        assert_eq!(
            process_args(&["hellohttp", "-v"]).unwrap().log_level,
            LevelFilter::Info
        );
        assert_eq!(
            process_args(&["hellohttp", "-vv"]).unwrap().log_level,
            LevelFilter::Debug
        );
        assert_eq!(
            process_args(&["hellohttp", "-q"]).unwrap().log_level,
            LevelFilter::Error
        );
        assert_eq!(
            process_args(&["hellohttp", "-qq"]).unwrap().log_level,
            LevelFilter::Off
        );
        assert!(
            Config::config_args(Command::new("hellohttp"))
                .try_get_matches_from(["hellohttp", "-v", "-q"])
                .is_err()
        );
    }
}
