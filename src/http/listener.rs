//! The HTTP listener.

use std::io::{self, Write};
use std::convert::Infallible;
use std::future::Future;
use std::net::{SocketAddr, TcpListener as StdListener};
use hyper::Server;
use hyper::service::{make_service_fn, service_fn};
use log::{debug, error};
use crate::config::Config;
use crate::error::ExitError;
use crate::utils::net;
use super::{RequestReport, handle_request};


//------------ http_listener -------------------------------------------------

/// Returns the bound address and a future for the HTTP listener.
///
/// Binding happens synchronously before this function returns, so a client
/// can connect to the returned address right away even if the future
/// hasn’t been polled yet.
pub fn http_listener(
    config: &Config,
) -> Result<(SocketAddr, impl Future<Output = ()>), ExitError> {
    let (listener, addr) = net::bind(&config.listen)?;
    debug!("HTTP listener bound to {}.", addr);
    Ok((addr, single_http_listener(listener)))
}

/// Returns a future for a single HTTP listener.
///
/// The future will never resolve unless an error happens that breaks the
/// listener, in which case it will log an error and resolve.
///
/// The future must be run on a Tokio runtime.
async fn single_http_listener(listener: StdListener) {
    let make_service = make_service_fn(|_conn| async {
        Ok::<_, Infallible>(service_fn(|req| async move {
            let (report, response) = handle_request(req).await;
            print_report(&report);
            Ok::<_, Infallible>(response)
        }))
    });
    let builder = match Server::from_tcp(listener) {
        Ok(builder) => builder,
        Err(err) => {
            error!("Failed on HTTP listener: {}", err);
            return
        }
    };
    if let Err(err) = builder.serve(make_service).await {
        error!("HTTP server error: {}", err);
    }
}

/// Writes a request report to stdout in one go.
fn print_report(report: &RequestReport) {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    if let Err(err) = write!(stdout, "{}", report).and_then(|_| {
        stdout.flush()
    }) {
        error!("Failed to write request report: {}", err);
    }
}
