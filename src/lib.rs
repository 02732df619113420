//! Placard runtime crate.
//!
//! A demonstration web server for cloud virtual machines: every request is
//! answered with a small HTML page naming the instance that served it, tinted
//! by the instance's availability zone. The metadata client lives in the
//! `placard-metadata` crate; everything here is the serving side.

pub mod config;
pub mod context;
pub mod error;
pub mod page;
pub mod runtime;
pub mod zone;

pub use crate::config::{ConfigError, RuntimeConfig, RuntimeConfigBuilder};
pub use crate::context::{InstanceContext, InstanceContextRejection};
pub use crate::error::{PlacardError, Result};
pub use crate::runtime::{run, serve};
pub use crate::zone::ZoneColor;
pub use placard_metadata::{EndpointParseError, MetadataClient, MetadataEndpoint, MetadataError};
