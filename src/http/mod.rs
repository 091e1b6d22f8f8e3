//! HTTP request interception: descriptors, gateway, spies and transports

pub mod descriptor;
pub mod gateway;
pub mod handle;
pub mod spy;
pub mod transport;

use std::fmt;

use serde::{Deserialize, Serialize};

/// URL schemes the gateway routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
