use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header;
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Empty};
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Link-local address every cloud instance can reach from inside itself.
const WELL_KNOWN_AUTHORITY: &str = "169.254.169.254";

const INSTANCE_ID_PATH: &str = "/latest/meta-data/instance-id";
const AVAILABILITY_ZONE_PATH: &str = "/latest/meta-data/placement/availability-zone";

/// Describes where the instance metadata service is listening.
///
/// The authority is a bare `host` or `host:port` pair; port 80 is assumed when
/// omitted, matching the well-known service. Tests and local development point
/// this at a stub server instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataEndpoint {
    authority: String,
}

impl MetadataEndpoint {
    /// Creates an endpoint from a `host` or `host:port` authority.
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }

    /// Returns the authority as configured.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    fn connect_addr(&self) -> String {
        if self.authority.contains(':') {
            self.authority.clone()
        } else {
            format!("{}:80", self.authority)
        }
    }
}

impl Default for MetadataEndpoint {
    /// The well-known link-local metadata address.
    fn default() -> Self {
        Self {
            authority: WELL_KNOWN_AUTHORITY.to_owned(),
        }
    }
}

impl fmt::Display for MetadataEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority)
    }
}

impl FromStr for MetadataEndpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let value = value.strip_prefix("http://").unwrap_or(value);
        let value = value.strip_suffix('/').unwrap_or(value);

        if value.is_empty() || value.contains('/') {
            return Err(EndpointParseError::InvalidEndpoint(s.trim().to_owned()));
        }

        Ok(Self {
            authority: value.to_owned(),
        })
    }
}

/// Errors encountered while parsing a [`MetadataEndpoint`] from a string.
#[derive(Debug, Error, Clone)]
pub enum EndpointParseError {
    #[error("invalid metadata endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Client for the instance metadata service.
///
/// Every fetch opens a fresh connection to the configured endpoint, issues a
/// plain HTTP/1.1 GET, and returns the response body decoded as text. Nothing
/// is cached or pooled; the values are re-read from the service on every call,
/// so callers always observe what the host currently reports.
///
/// The client is cheap to clone and safe to share across request tasks.
///
/// # Errors
/// Fetches return [`MetadataError`] when the service is unreachable, answers
/// with a non-success status, violates the protocol, or takes longer than the
/// configured timeout.
///
/// # Examples
/// ```ignore
/// use placard_metadata::{MetadataClient, MetadataEndpoint};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MetadataClient::new(MetadataEndpoint::default());
/// let instance_id = client.instance_id().await?;
/// println!("running on {instance_id}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct MetadataClient {
    inner: Arc<MetadataClientInner>,
}

#[derive(Debug)]
struct MetadataClientInner {
    endpoint: MetadataEndpoint,
    timeout: Duration,
}

impl MetadataClient {
    /// Creates a client for `endpoint` using the default fetch timeout.
    pub fn new(endpoint: MetadataEndpoint) -> Self {
        Self::with_timeout(endpoint, DEFAULT_FETCH_TIMEOUT)
    }

    /// Creates a client that bounds every fetch with a custom timeout.
    ///
    /// The timeout covers the whole exchange: connect, request, and reading
    /// the body. A service that accepts the connection but never answers
    /// cannot hold a request task hostage for longer than this.
    pub fn with_timeout(endpoint: MetadataEndpoint, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(MetadataClientInner { endpoint, timeout }),
        }
    }

    /// Returns the endpoint backing this client.
    pub fn endpoint(&self) -> &MetadataEndpoint {
        &self.inner.endpoint
    }

    /// Fetches the instance identifier.
    ///
    /// # Returns
    /// The full response body decoded as text, unmodified. The identifier is
    /// an opaque token; nothing here parses or validates it.
    ///
    /// # Errors
    /// Returns [`MetadataError`] if the service cannot be reached, answers
    /// with a non-success status, or the timeout elapses.
    pub async fn instance_id(&self) -> Result<String, MetadataError> {
        self.fetch(INSTANCE_ID_PATH).await
    }

    /// Fetches the availability zone string.
    ///
    /// # Returns
    /// The full zone string (for example `us-east-1a`); callers interested in
    /// the zone letter take the final character themselves.
    ///
    /// # Errors
    /// Returns [`MetadataError`] if the service cannot be reached, answers
    /// with a non-success status, or the timeout elapses.
    pub async fn availability_zone(&self) -> Result<String, MetadataError> {
        self.fetch(AVAILABILITY_ZONE_PATH).await
    }

    async fn fetch(&self, path: &str) -> Result<String, MetadataError> {
        match time::timeout(self.inner.timeout, self.fetch_inner(path)).await {
            Ok(result) => result,
            // Dropping the in-flight future closes the connection.
            Err(_) => Err(MetadataError::Timeout(self.inner.timeout)),
        }
    }

    async fn fetch_inner(&self, path: &str) -> Result<String, MetadataError> {
        let endpoint = &self.inner.endpoint;

        let stream = TcpStream::connect(endpoint.connect_addr()).await?;
        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await?;

        // The driver task ends as soon as the exchange completes or either
        // side hangs up; nothing outlives the fetch.
        tokio::spawn(async move {
            if let Err(err) = conn.await {
                tracing::debug!("metadata connection closed: {err}");
            }
        });

        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(header::HOST, endpoint.authority())
            .body(Empty::<Bytes>::new())?;

        let response = sender.send_request(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::UnexpectedStatus(status));
        }

        let body = response.into_body().collect().await?.to_bytes();
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Errors emitted by [`MetadataClient`] when a fetch fails.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata fetch timed out after {0:?}")]
    Timeout(Duration),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] hyper::Error),
    #[error("invalid metadata request: {0}")]
    Request(#[from] http::Error),
    #[error("metadata service returned {0}")]
    UnexpectedStatus(StatusCode),
}
