//! Scheme-addressed request gateway
//!
//! Transports are injected per scheme when the gateway is built; nothing is
//! patched at process level. Application code calls [`Gateway::request`],
//! and spies wrap the scheme's `"request"` slot through the generic spy
//! machinery without the call sites noticing.

use std::collections::HashMap;

use tracing::debug;

use crate::error::GatewayError;
use crate::http::descriptor::RequestArgs;
use crate::http::handle::Connection;
use crate::http::Scheme;
use crate::spy::{SpySlot, SpyTarget};

/// Outcome of a request initiation
pub type DispatchResult<H> = std::result::Result<H, GatewayError>;

/// One scheme's request entry point, with its spy-wrappable `"request"` slot
pub struct SchemeClient<H> {
    scheme: Scheme,
    slot: SpySlot<RequestArgs, DispatchResult<H>>,
}

impl<H> SchemeClient<H>
where
    H: Connection + Clone + 'static,
{
    fn new<F>(scheme: Scheme, transport: F) -> Self
    where
        F: Fn(RequestArgs) -> DispatchResult<H> + Send + Sync + 'static,
    {
        Self {
            scheme,
            slot: SpySlot::new(transport),
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Initiate a request through whatever function the slot currently holds
    pub fn request(&self, args: impl Into<RequestArgs>) -> DispatchResult<H> {
        self.slot.call(args.into())
    }
}

impl<H> SpyTarget<RequestArgs, DispatchResult<H>> for SchemeClient<H>
where
    H: Connection + Clone + 'static,
{
    fn spy_slot(&self, method: &str) -> Option<&SpySlot<RequestArgs, DispatchResult<H>>> {
        (method == "request").then_some(&self.slot)
    }
}

/// Builder injecting one transport function per scheme
pub struct GatewayBuilder<H> {
    clients: HashMap<Scheme, SchemeClient<H>>,
}

impl<H> GatewayBuilder<H>
where
    H: Connection + Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    /// Register the request-initiation function for `scheme`
    pub fn with_transport<F>(mut self, scheme: Scheme, transport: F) -> Self
    where
        F: Fn(RequestArgs) -> DispatchResult<H> + Send + Sync + 'static,
    {
        debug!(%scheme, "transport registered");
        self.clients
            .insert(scheme, SchemeClient::new(scheme, transport));
        self
    }

    pub fn build(self) -> Gateway<H> {
        Gateway {
            clients: self.clients,
        }
    }
}

impl<H> Default for GatewayBuilder<H>
where
    H: Connection + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Scheme-addressed registry of request entry points
pub struct Gateway<H> {
    clients: HashMap<Scheme, SchemeClient<H>>,
}

impl<H> Gateway<H>
where
    H: Connection + Clone + 'static,
{
    pub fn builder() -> GatewayBuilder<H> {
        GatewayBuilder::new()
    }

    /// The scheme's client, when a transport was registered for it
    pub fn client(&self, scheme: Scheme) -> Option<&SchemeClient<H>> {
        self.clients.get(&scheme)
    }

    /// Initiate a request on the scheme's entry point
    pub fn request(&self, scheme: Scheme, args: impl Into<RequestArgs>) -> DispatchResult<H> {
        let client = self
            .clients
            .get(&scheme)
            .ok_or(GatewayError::SchemeNotRegistered(scheme))?;
        client.request(args)
    }
}
