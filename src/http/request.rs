//! Reporting on received requests.

use std::fmt;
use bytes::Bytes;
use hyper::{Body, Method, Request};
use hyper::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use log::{debug, error};


//------------ RequestReport -------------------------------------------------

/// Everything the listener tells about a request it received.
///
/// The report is rendered via its `Display` impl. Every line is prefixed
/// with `server:` except for the individual header lines which are
/// indented by a tab.
#[derive(Clone, Debug)]
pub struct RequestReport {
    /// The request method.
    method: Method,

    /// The path portion of the request URI.
    path: String,

    /// The decoded value of the `id` query parameter or empty.
    id: String,

    /// The value of the Content-Type header or empty.
    content_type: String,

    /// All headers with their values joined by commas.
    headers: Vec<(String, String)>,

    /// The request body.
    ///
    /// If reading the body failed, this is empty.
    body: Bytes,

    /// The error that happened while reading the body, if any.
    body_error: Option<String>,
}

impl RequestReport {
    /// Creates the report for a request, reading its entire body.
    ///
    /// A failure to read the body is logged and kept in the report.
    pub async fn read(req: Request<Body>) -> Self {
        let (parts, body) = req.into_parts();
        let (body, body_error) = match hyper::body::to_bytes(body).await {
            Ok(body) => (body, None),
            Err(err) => {
                error!("Failed to read HTTP request body: {}", err);
                (Bytes::new(), Some(err.to_string()))
            }
        };
        let headers = collect_headers(&parts.headers);
        debug!(
            "Received {} request for {} with {} headers.",
            parts.method, parts.uri, headers.len()
        );
        RequestReport {
            id: query_id(parts.uri.query()),
            content_type: parts.headers.get(CONTENT_TYPE).map(
                header_str
            ).unwrap_or_default(),
            path: parts.uri.path().into(),
            method: parts.method,
            headers,
            body,
            body_error,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn body_error(&self) -> Option<&str> {
        self.body_error.as_deref()
    }
}


//--- Display

impl fmt::Display for RequestReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "server: {} {}", self.method, self.path)?;
        writeln!(f, "server: query id: {}", self.id)?;
        writeln!(f, "server: content-type: {}", self.content_type)?;
        writeln!(f, "server: headers:")?;
        for (name, value) in &self.headers {
            writeln!(f, "\t{} = {}", name, value)?;
        }
        if let Some(err) = self.body_error.as_ref() {
            writeln!(f, "server: could not read request body: {}", err)?;
        }
        writeln!(
            f, "server: request body: {}",
            String::from_utf8_lossy(&self.body)
        )
    }
}


//------------ Helper Functions ----------------------------------------------

/// Returns the first `id` query parameter or an empty string.
fn query_id(query: Option<&str>) -> String {
    let query = match query {
        Some(query) => query,
        None => return String::new()
    };
    form_urlencoded::parse(query.as_bytes()).find_map(|(key, value)| {
        if key == "id" {
            Some(value.into_owned())
        }
        else {
            None
        }
    }).unwrap_or_default()
}

/// Collects all headers, one entry per name.
///
/// Multiple values for the same name are joined with a comma.
fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers.keys().map(|name| {
        let values: Vec<_> = headers.get_all(name).iter().map(
            header_str
        ).collect();
        (name.as_str().into(), values.join(", "))
    }).collect()
}

/// Converts a header value into a string.
///
/// Values that aren’t visible ASCII are converted lossily.
fn header_str(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn report(req: Request<Body>) -> RequestReport {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(RequestReport::read(req))
    }

    #[test]
    fn query_ids() {
        assert_eq!(query_id(None), "");
        assert_eq!(query_id(Some("")), "");
        assert_eq!(query_id(Some("id=1234")), "1234");
        assert_eq!(query_id(Some("foo=bar&id=a%20b")), "a b");
        assert_eq!(query_id(Some("id=1&id=2")), "1");
        assert_eq!(query_id(Some("identity=1")), "");
    }

    #[test]
    fn joined_headers() {
        let req = Request::builder()
            .uri("/")
            .header("Accept", "text/plain")
            .header("X-Thing", "one")
            .header("X-Thing", "two")
            .body(Body::empty())
            .unwrap();
        let report = report(req);
        assert_eq!(
            report.headers(),
            [
                ("accept".to_string(), "text/plain".to_string()),
                ("x-thing".to_string(), "one, two".to_string()),
            ]
        );
    }

    #[test]
    fn display() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/?id=1234")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"client_message": "hello, server!"}"#))
            .unwrap();
        assert_eq!(
            report(req).to_string(),
            "server: POST /\n\
             server: query id: 1234\n\
             server: content-type: application/json\n\
             server: headers:\n\
             \tcontent-type = application/json\n\
             server: request body: {\"client_message\": \"hello, server!\"}\n"
        );
    }
}
