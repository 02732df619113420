use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use placard_metadata::{MetadataClient, MetadataError};

/// Request-scoped handle over the metadata client the runtime injected.
///
/// Handlers never construct clients themselves; the runtime places one in the
/// request extensions and this extractor hands it out per request.
#[derive(Clone, Debug)]
pub struct InstanceContext {
    client: MetadataClient,
}

impl InstanceContext {
    /// Returns the low-level metadata client.
    pub fn metadata_client(&self) -> &MetadataClient {
        &self.client
    }

    /// Fetches the instance identifier, fresh from the metadata service.
    pub async fn instance_id(&self) -> Result<String, MetadataError> {
        self.client.instance_id().await
    }

    /// Fetches the availability zone string, fresh from the metadata service.
    pub async fn availability_zone(&self) -> Result<String, MetadataError> {
        self.client.availability_zone().await
    }
}

/// Errors emitted when a handler requests [`InstanceContext`] but extensions were not set up.
#[derive(Debug, Error)]
pub enum InstanceContextRejection {
    #[error("metadata client missing from request extensions")]
    MissingMetadataClient,
}

impl IntoResponse for InstanceContextRejection {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let message = self.to_string();
        (status, message).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for InstanceContext
where
    S: Send + Sync,
{
    type Rejection = InstanceContextRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let client = parts
            .extensions
            .get::<MetadataClient>()
            .cloned()
            .ok_or(InstanceContextRejection::MissingMetadataClient)?;

        Ok(Self { client })
    }
}
