//! Utility functions related to networking.

use std::net::{SocketAddr, TcpListener as StdListener};
use log::error;
use crate::error::ExitError;


/// Binds a non-blocking listener to `addr`.
///
/// Returns the listener together with the address it actually got bound
/// to, which differs from `addr` if that asked for port 0. Binding happens
/// synchronously so the socket is accepting connections by the time this
/// function returns.
pub fn bind(
    addr: &SocketAddr
) -> Result<(StdListener, SocketAddr), ExitError> {
    let listener = StdListener::bind(addr).map_err(|err| {
        error!("Fatal: cannot listen for HTTP on {}: {}", addr, err);
        ExitError::Generic
    })?;
    listener.set_nonblocking(true).map_err(|err| {
        error!("Fatal: error switching {} to nonblocking: {}", addr, err);
        ExitError::Generic
    })?;
    let local = listener.local_addr().map_err(|err| {
        error!("Fatal: cannot determine address bound for {}: {}", addr, err);
        ExitError::Generic
    })?;
    Ok((listener, local))
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bind_ephemeral() {
        let (listener, addr) = bind(&"127.0.0.1:0".parse().unwrap()).unwrap();
        assert_ne!(addr.port(), 0);
        assert_eq!(listener.local_addr().unwrap(), addr);
    }

    #[test]
    fn bind_in_use() {
        let (_first, addr) = bind(&"127.0.0.1:0".parse().unwrap()).unwrap();
        assert_eq!(bind(&addr).unwrap_err(), ExitError::Generic);
    }
}
