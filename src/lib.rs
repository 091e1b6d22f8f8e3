//! Tapline - Console-Style Logging and HTTP Request Interception
//!
//! This library provides two cooperating observability seams: a pluggable
//! leveled logger compatible with the console surface, and a request
//! gateway whose per-scheme initiation functions can be wrapped by spies
//! without the call sites noticing.
//!
//! ## Features
//!
//! - **Console Logger**: six leveled methods (`error`, `warn`, `info`,
//!   `log`, `table`, `dir`) behind one write pipeline
//! - **Pluggable Formatting**: replaceable formatter with a `None`
//!   suppression sentinel and plain/JSON presets
//! - **Write Hooks**: optional callbacks before and after every sink write
//! - **Injected Transports**: per-scheme request functions instead of
//!   process-global patching
//! - **Request Spies**: normalized descriptors plus one-shot completion
//!   callbacks, attached non-destructively and nestable
//! - **Settings**: TOML files with environment overrides for sinks and
//!   formatter presets
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tapline::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Console half: build a logger and take over the global facade
//!     let logger = Logger::new(LoggerOptions::default())?;
//!     replace_global_console(logger.clone())?;
//!     log::info!("routed through the tapline logger");
//!
//!     // Request half: inject a transport, then observe every request
//!     let transport =
//!         ReqwestTransport::new(Scheme::Https, tokio::runtime::Handle::current())?;
//!     let gateway = GatewayBuilder::new()
//!         .with_transport(Scheme::Https, transport.into_request_fn())
//!         .build();
//!     attach_https_request_spy(
//!         &gateway,
//!         move |handle, descriptor| {
//!             logger.info(format_args!("[{}] {:?}", handle.id(), descriptor.hostname));
//!         },
//!         None,
//!     )?;
//!     gateway.request(Scheme::Https, "https://example.tld/status")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod logger;
pub mod spy;

pub use error::{Result, TaplineError};
pub use logger::{Level, Logger, LoggerOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{loader::load_settings, loader::load_settings_with_env, LoggerSettings};
    pub use crate::console::replace_global_console;
    pub use crate::error::{Result, TaplineError};
    pub use crate::http::descriptor::{normalize, RequestArgs, RequestDescriptor, RequestOptions};
    pub use crate::http::gateway::{DispatchResult, Gateway, GatewayBuilder, SchemeClient};
    pub use crate::http::handle::{Connection, FinishInfo, FinishLatch, FinishObserver};
    pub use crate::http::spy::{
        attach_http_request_spy, attach_https_request_spy, attach_request_spy, CloseSpy,
    };
    pub use crate::http::transport::{ReqwestHandle, ReqwestTransport};
    pub use crate::http::Scheme;
    pub use crate::logger::{BufferSink, Level, Logger, LoggerOptions, Sink, SinkSpec};
    pub use crate::spy::{attach_spy, SpySlot, SpyTarget};
}
