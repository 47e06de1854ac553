//! Building responses.

use hyper::{Body, Response, StatusCode};


/// The body of every response.
pub const HELLO_BODY: &str = r#"{"Message": "hello!"}"#;

/// Returns the one and only response of the server.
pub fn hello() -> Response<Body> {
    let mut res = Response::new(Body::from(HELLO_BODY));
    *res.status_mut() = StatusCode::OK;
    res.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    res
}
