use axum::response::Html;
use tracing::warn;

use crate::context::InstanceContext;
use crate::zone::ZoneColor;

/// Answers every request with the instance placard page.
///
/// Metadata lookups that fail degrade instead of failing the request: a
/// missing identifier renders empty, a missing or unknown zone falls back to
/// red. The status is always 200.
pub async fn index(context: InstanceContext) -> Html<String> {
    let instance_id = match context.instance_id().await {
        Ok(id) => id,
        Err(err) => {
            warn!(error = %err, "instance id lookup failed");
            String::new()
        }
    };

    let zone = match context.availability_zone().await {
        Ok(zone) => zone,
        Err(err) => {
            warn!(error = %err, "availability zone lookup failed");
            String::new()
        }
    };

    Html(render(&instance_id, ZoneColor::for_zone(&zone)))
}

/// The whole site: a welcome line, the serving instance, a background tint.
///
/// The identifier is embedded verbatim; it is an opaque token from the
/// metadata service, not user input.
fn render(instance_id: &str, color: ZoneColor) -> String {
    format!(
        "<h1>Welcome to my website</h1>\n<h2>from {instance_id}</h2>\n<style>body {{background-color: {}}}</style>\n",
        color.css()
    )
}
