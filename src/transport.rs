use crate::config::GraphConfig;
use log::debug;
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderName, HeaderValue},
    redirect::Policy,
    Method,
};
use std::fmt;
use std::io::{self, Cursor, Read, Write};
use std::time::Duration;

/// A fully built request, ready to hand to a transport.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Status, headers and an unread body. The body is a reader so downloads can
/// be streamed to a sink without buffering the whole payload.
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Read + Send + 'static) -> Self {
        HttpResponse {
            status,
            headers,
            body: Box::new(body),
        }
    }

    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, HeaderMap::new(), Cursor::new(body.into()))
    }

    /// Adds a response header; invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        let name = HeaderName::from_bytes(name.as_bytes());
        if let (Ok(name), Ok(value)) = (name, value.parse::<HeaderValue>()) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.body.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Streams the remaining body into `sink`, returning the bytes copied.
    pub fn copy_to<W: Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<u64> {
        io::copy(&mut self.body, sink)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// The request could not be delivered or no response was read.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends exactly one request and returns whatever the server answered.
/// Implementations must not retry or follow pagination.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Blocking reqwest transport shared by every call of one session.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &GraphConfig) -> Result<Self, TransportError> {
        Ok(HttpTransport {
            client: build_blocking_client(config.timeout())?,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!("[http] {} {}", request.method, request.url);
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .map_err(|e| TransportError(format!("request to {} failed: {e}", request.url)))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        Ok(HttpResponse::new(status, headers, response))
    }
}

/// Blocking client with the session timeout and a bounded redirect policy.
fn build_blocking_client(timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(timeout)
        .redirect(Policy::limited(10))
        .build()
        .map_err(|e| TransportError(format!("failed to build HTTP client: {e}")))
}
