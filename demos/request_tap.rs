//! Request interception example: gateway, transport and spies
//!
//! Wires the reqwest transport into a gateway, attaches request and
//! socket-close spies, and shares the wired gateway process-wide through
//! a `OnceLock`.

use std::sync::OnceLock;
use std::time::Duration;

use tapline::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

static GATEWAY: OnceLock<Gateway<ReqwestHandle>> = OnceLock::new();

/// Shared access point for code that cannot thread the gateway through
fn gateway() -> &'static Gateway<ReqwestHandle> {
    GATEWAY.get().expect("gateway is installed in main")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Surface the crate's own debug events alongside the spy output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    println!("=== Tapline Request Tap Example ===\n");

    println!("1. Building the gateway...");
    let runtime = tokio::runtime::Handle::current();
    let http = ReqwestTransport::new(Scheme::Http, runtime.clone())?;
    let https = ReqwestTransport::new(Scheme::Https, runtime)?;
    let wired = GatewayBuilder::new()
        .with_transport(Scheme::Http, http.into_request_fn())
        .with_transport(Scheme::Https, https.into_request_fn())
        .build();
    println!("   ✓ Transports registered for http and https");

    println!("\n2. Attaching spies...");
    let logger = Logger::new(LoggerOptions::default())?;
    let request_logger = logger.clone();
    let close_logger = logger;
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    attach_https_request_spy(
        &wired,
        move |handle, descriptor| {
            request_logger.info(format_args!(
                "[{}] {} {}{}",
                handle.id(),
                descriptor.method.as_deref().unwrap_or("GET"),
                descriptor.hostname.as_deref().unwrap_or("-"),
                descriptor.path.as_deref().unwrap_or("/"),
            ));
        },
        Some(Box::new(move |handle: &ReqwestHandle, info: &FinishInfo| {
            close_logger.info(format_args!(
                "[{}] finished status={:?} error={:?} elapsed={:?}",
                handle.id(),
                info.status,
                info.error,
                info.elapsed,
            ));
            let _ = done_tx.send(());
        })),
    )?;
    println!("   ✓ Request and socket-close spies attached");

    println!("\n3. Publishing the gateway...");
    GATEWAY.get_or_init(|| wired);
    println!("   ✓ Gateway available process-wide");

    println!("\n4. Issuing a request through the shared handle...");
    gateway().request(Scheme::Https, "https://example.com/")?;

    match tokio::time::timeout(Duration::from_secs(30), done_rx.recv()).await {
        Ok(Some(())) => println!("   ✓ Socket-close spy fired"),
        _ => println!("   ✗ No completion before the timeout"),
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
