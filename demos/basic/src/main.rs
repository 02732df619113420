use placard::run;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // A failed bind (port 80 taken, insufficient privileges) is fatal: log
    // the cause and exit non-zero. There is no retry or fallback port.
    if let Err(err) = run().await {
        tracing::error!(error = %err, "placard failed");
        std::process::exit(1);
    }
}
