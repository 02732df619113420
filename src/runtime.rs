use axum::Router;
use axum::extract::Extension;
use tokio::net::TcpListener;

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::page;
use placard_metadata::MetadataClient;

/// Serves the placard page with the provided configuration.
///
/// Binding the listener is the only fallible startup step; the error is
/// returned to the caller, which is expected to treat it as fatal. Once
/// serving, this does not return.
pub async fn serve(config: RuntimeConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        metadata = %config.metadata_endpoint,
        "placard listening"
    );

    let client = MetadataClient::with_timeout(config.metadata_endpoint, config.metadata_timeout);

    // No routes: every method on every path falls through to the page.
    let router = Router::new()
        .fallback(page::index)
        .layer(Extension(client));
    let service = router.into_make_service();

    axum::serve(listener, service).await?;

    Ok(())
}

/// Loads [`RuntimeConfig`] from the environment and starts serving.
pub async fn run() -> Result<()> {
    let config = RuntimeConfig::from_env()?;
    serve(config).await
}
