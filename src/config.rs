use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use dotenvy::Error as DotenvError;
use placard_metadata::MetadataEndpoint;
use thiserror::Error;

const DEFAULT_PORT: u16 = 80;
const DEFAULT_METADATA_TIMEOUT: Duration = Duration::from_secs(2);
const PORT_ENV: &str = "PORT";
const ADDR_ENV: &str = "PLACARD_ADDR";
const METADATA_ENDPOINT_ENV: &str = "PLACARD_METADATA_ENDPOINT";

/// Configuration consumed by the runtime before binding the listener.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub bind_addr: SocketAddr,
    pub metadata_endpoint: MetadataEndpoint,
    pub metadata_timeout: Duration,
}

impl RuntimeConfig {
    /// Loads configuration from the process environment.
    ///
    /// Values from a local `.env` file (parsed via [`dotenvy::dotenv_override`]) override whatever is already set in
    /// the process environment, which makes local development workflows predictable. A deployed
    /// instance typically sets none of these and gets the well-known defaults: port 80, the
    /// link-local metadata address.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_overrides()?;

        let port = resolve_port();

        let addr = env::var(ADDR_ENV)
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let bind_addr = SocketAddr::new(addr, port);

        let metadata_endpoint = env::var(METADATA_ENDPOINT_ENV)
            .ok()
            .map(|value| {
                MetadataEndpoint::from_str(&value)
                    .map_err(|_| ConfigError::InvalidMetadataEndpoint(value))
            })
            .transpose()? // convert Option<Result> -> Result<Option>
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            metadata_endpoint,
            metadata_timeout: DEFAULT_METADATA_TIMEOUT,
        })
    }

    /// Returns a builder for programmatic overrides.
    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }
}

impl Default for RuntimeConfig {
    /// Binds to `0.0.0.0:80` and queries the link-local metadata address.
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            metadata_endpoint: MetadataEndpoint::default(),
            metadata_timeout: DEFAULT_METADATA_TIMEOUT,
        }
    }
}

/// Builder type for [`RuntimeConfig`].
#[derive(Default, Clone, Debug)]
pub struct RuntimeConfigBuilder {
    bind_addr: Option<SocketAddr>,
    metadata_endpoint: Option<MetadataEndpoint>,
    metadata_timeout: Option<Duration>,
}

impl RuntimeConfigBuilder {
    /// Sets the address for the embedded Axum listener.
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    /// Sets the metadata service authority to query.
    pub fn metadata_endpoint(mut self, endpoint: MetadataEndpoint) -> Self {
        self.metadata_endpoint = Some(endpoint);
        self
    }

    /// Sets the bound on each outbound metadata fetch.
    pub fn metadata_timeout(mut self, timeout: Duration) -> Self {
        self.metadata_timeout = Some(timeout);
        self
    }

    /// Builds the final configuration.
    pub fn build(self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self
                .bind_addr
                .unwrap_or_else(|| SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)),
            metadata_endpoint: self.metadata_endpoint.unwrap_or_default(),
            metadata_timeout: self.metadata_timeout.unwrap_or(DEFAULT_METADATA_TIMEOUT),
        }
    }
}

/// Errors that can occur while building [`RuntimeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid metadata endpoint: {0}")]
    InvalidMetadataEndpoint(String),
    #[error("failed to load .env overrides: {0}")]
    Dotenv(#[from] DotenvError),
}

fn load_env_overrides() -> Result<(), ConfigError> {
    match dotenvy::dotenv_override() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err)),
    }
}

fn resolve_port() -> u16 {
    env::var(PORT_ENV)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
