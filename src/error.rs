use thiserror::Error;

use crate::config::ConfigError;
use placard_metadata::MetadataError;

pub type Result<T> = std::result::Result<T, PlacardError>;

#[derive(Debug, Error)]
pub enum PlacardError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
