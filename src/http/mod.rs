//! The HTTP server.
//!
//! The module provides the in-process HTTP listener. The public item
//! [`http_listener`] binds the configured address and returns a future that
//! drives the server. Every request, regardless of method or path, is
//! answered by [`handle_request`] with the same small JSON document.

pub use self::listener::http_listener;
pub use self::request::RequestReport;
pub use self::response::HELLO_BODY;

mod listener;
mod request;
mod response;


//------------ handle_request ------------------------------------------------

use hyper::{Body, Request, Response};


/// Handles a single request.
///
/// Returns the report describing the request together with the response.
/// The response does not depend on the request at all. In particular, a
/// failure reading the request body is recorded in the report but the
/// request is answered all the same.
pub async fn handle_request(
    req: Request<Body>,
) -> (RequestReport, Response<Body>) {
    let report = RequestReport::read(req).await;
    (report, response::hello())
}


//============ Tests =========================================================
