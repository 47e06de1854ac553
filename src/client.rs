//! The HTTP client.
//!
//! The client sends exactly one request to the listener and reports the
//! response on stdout.

use std::fmt;
use bytes::Bytes;
use log::{debug, error, warn};
use reqwest::{StatusCode, Url, header};
use reqwest::blocking::{Client, ClientBuilder};
use crate::config::Config;
use crate::error::Failed;


//------------ HttpClient ----------------------------------------------------

/// The HTTP client for talking to the listener.
#[derive(Debug)]
pub struct HttpClient {
    /// The (blocking) reqwest client.
    client: Client,

    /// The host name to connect to.
    host: String,

    /// The value of the `id` query parameter.
    id: String,

    /// The body of the request.
    message: Bytes,
}

impl HttpClient {
    /// Creates a new client based on the config.
    ///
    /// The client spawns its own threads, so this must not be called from
    /// within an async context.
    pub fn new(config: &Config) -> Result<Self, Failed> {

        // Deal with the reqwest’s TLS features by defining a creator
        // function for the two cases.
        #[cfg(not(feature = "native-tls"))]
        fn create_builder() -> ClientBuilder {
            Client::builder().use_rustls_tls()
        }

        #[cfg(feature = "native-tls")]
        fn create_builder() -> ClientBuilder {
            Client::builder().use_native_tls()
        }

        let client = match create_builder().timeout(config.timeout).build() {
            Ok(client) => client,
            Err(err) => {
                error!("Client: failed to initialize HTTP client: {}", err);
                return Err(Failed)
            }
        };
        Ok(HttpClient {
            client,
            host: config.host.clone(),
            id: config.id.clone(),
            message: Bytes::from(config.message.clone()),
        })
    }

    /// Returns the URL to send the request to for the given port.
    pub fn request_url(&self, port: u16) -> Result<Url, Failed> {
        let mut url = match Url::parse(
            &format!("http://{}:{}/", self.host, port)
        ) {
            Ok(url) => url,
            Err(err) => {
                error!(
                    "Client: could not create request URL for host '{}': {}",
                    self.host, err
                );
                return Err(Failed)
            }
        };
        url.query_pairs_mut().append_pair("id", &self.id);
        Ok(url)
    }

    /// Sends the request to `url` and returns the response.
    pub fn exchange(&self, url: Url) -> Result<Exchange, Failed> {
        debug!("Client: sending POST request to {}", url);
        let request = match self.client.post(url).header(
            header::CONTENT_TYPE, "application/json"
        ).body(self.message.clone()).build() {
            Ok(request) => request,
            Err(err) => {
                error!("Client: could not create request: {}", err);
                return Err(Failed)
            }
        };
        let response = match self.client.execute(request) {
            Ok(response) => response,
            Err(err) => {
                error!("Error making http request: {}", err);
                return Err(Failed)
            }
        };
        let status = response.status();
        let body = match response.bytes() {
            Ok(body) => body,
            Err(err) => {
                error!("Client: could not read response body: {}", err);
                return Err(Failed)
            }
        };
        if serde_json::from_slice::<serde_json::Value>(&body).is_err() {
            warn!("Client: response body is not valid JSON.");
        }
        Ok(Exchange { status, body })
    }
}


//------------ Exchange ------------------------------------------------------

/// The outcome of a request.
#[derive(Clone, Debug)]
pub struct Exchange {
    /// The status code of the response.
    status: StatusCode,

    /// The full body of the response.
    body: Bytes,
}

impl Exchange {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Client: got response!")?;
        writeln!(f, "Client: status code: {}", self.status.as_u16())?;
        writeln!(
            f, "Client: response body: {}",
            String::from_utf8_lossy(&self.body)
        )
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::time::Duration;
    use super::*;

    fn client(host: &str, id: &str) -> HttpClient {
        let mut config = Config::default();
        config.host = host.into();
        config.id = id.into();
        config.timeout = Duration::from_secs(5);
        HttpClient::new(&config).unwrap()
    }

    #[test]
    fn default_request_url() {
        assert_eq!(
            client("localhost", "1234").request_url(3333).unwrap().as_str(),
            "http://localhost:3333/?id=1234"
        );
    }

    #[test]
    fn encoded_request_url() {
        assert_eq!(
            client("127.0.0.1", "a b&c").request_url(8080).unwrap().as_str(),
            "http://127.0.0.1:8080/?id=a+b%26c"
        );
    }

    #[test]
    fn bad_host() {
        assert!(client("no such host", "1").request_url(80).is_err());
    }

    #[test]
    fn refused_connection() {
        // Bind and immediately drop a listener to find a port nobody
        // listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap()
            .local_addr().unwrap().port();
        let client = client("127.0.0.1", "1");
        let url = client.request_url(port).unwrap();
        assert!(client.exchange(url).is_err());
    }

    #[test]
    fn display_exchange() {
        let exchange = Exchange {
            status: StatusCode::OK,
            body: Bytes::from_static(br#"{"Message": "hello!"}"#),
        };
        assert_eq!(
            exchange.to_string(),
            "Client: got response!\n\
             Client: status code: 200\n\
             Client: response body: {\"Message\": \"hello!\"}\n"
        );
    }
}
