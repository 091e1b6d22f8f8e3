//! Request spies over the gateway
//!
//! [`attach_request_spy`] wraps a scheme's request slot so that every
//! initiation runs the original transport first with unchanged arguments,
//! then synchronously hands the new handle plus the normalized descriptor
//! to the request callback, and finally returns the transport's handle to
//! the caller untouched. An optional close callback is registered on the
//! handle and fires at most once when the exchange completes, however it
//! ends.

use std::sync::Arc;

use tracing::debug;

use crate::error::{GatewayError, Result};
use crate::http::descriptor::{normalize, RequestDescriptor};
use crate::http::gateway::Gateway;
use crate::http::handle::{Connection, FinishInfo};
use crate::http::Scheme;
use crate::spy::attach_spy;

/// Boxed close callback, invoked with the handle and the completion summary
pub type CloseSpy<H> = Box<dyn Fn(&H, &FinishInfo) + Send + Sync>;

/// Attach request and close spies around `scheme`'s request entry point.
///
/// Fails before any wrapping occurs when no transport is registered for
/// the scheme. Attaching twice nests: both request spies observe each
/// initiation, newest first, and the transport still runs once.
pub fn attach_request_spy<H, F>(
    gateway: &Gateway<H>,
    scheme: Scheme,
    request_spy: F,
    socket_close_spy: Option<CloseSpy<H>>,
) -> Result<()>
where
    H: Connection + Clone + 'static,
    F: Fn(&H, &RequestDescriptor) + Send + Sync + 'static,
{
    let client = gateway
        .client(scheme)
        .ok_or(GatewayError::SchemeNotRegistered(scheme))?;
    let close_spy: Option<Arc<dyn Fn(&H, &FinishInfo) + Send + Sync>> =
        socket_close_spy.map(Arc::from);
    attach_spy(client, "request", move |args, call_original| {
        let handle = call_original()?;
        let descriptor = normalize(args);
        request_spy(&handle, &descriptor);
        if let Some(close_spy) = &close_spy {
            let close_spy = Arc::clone(close_spy);
            let observed = handle.clone();
            handle.on_finished(Box::new(move |info| close_spy(&observed, info)));
        }
        Ok(handle)
    })?;
    debug!(%scheme, "request spy attached");
    Ok(())
}

/// [`attach_request_spy`] bound to plain HTTP
pub fn attach_http_request_spy<H, F>(
    gateway: &Gateway<H>,
    request_spy: F,
    socket_close_spy: Option<CloseSpy<H>>,
) -> Result<()>
where
    H: Connection + Clone + 'static,
    F: Fn(&H, &RequestDescriptor) + Send + Sync + 'static,
{
    attach_request_spy(gateway, Scheme::Http, request_spy, socket_close_spy)
}

/// [`attach_request_spy`] bound to HTTPS
pub fn attach_https_request_spy<H, F>(
    gateway: &Gateway<H>,
    request_spy: F,
    socket_close_spy: Option<CloseSpy<H>>,
) -> Result<()>
where
    H: Connection + Clone + 'static,
    F: Fn(&H, &RequestDescriptor) + Send + Sync + 'static,
{
    attach_request_spy(gateway, Scheme::Https, request_spy, socket_close_spy)
}
