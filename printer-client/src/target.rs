//! Downstream target addressing

use crate::error::{PrintError, PrintResult};
use std::fmt;

/// Fixed downstream endpoint a relay forwards jobs to
///
/// Either a printer's web API (`/StarWebPRNT/SendMessage` on port 80) or
/// another relay's `/print` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTarget {
    host: String,
    port: u16,
    path: String,
}

impl RelayTarget {
    /// Create a validated target
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> PrintResult<Self> {
        let host = host.into().trim().to_string();
        let path = path.into();

        if host.is_empty() {
            return Err(PrintError::InvalidConfig("Target host is empty".into()));
        }
        if host.contains('/') || host.contains(' ') {
            return Err(PrintError::InvalidConfig(format!(
                "Invalid target host: {}",
                host
            )));
        }
        if port == 0 {
            return Err(PrintError::InvalidConfig("Target port is 0".into()));
        }
        if !path.starts_with('/') {
            return Err(PrintError::InvalidConfig(format!(
                "Target path must start with '/': {}",
                path
            )));
        }

        Ok(Self { host, port, path })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Full URL the job is POSTed to
    pub fn url(&self) -> String {
        // Bare IPv6 literals need brackets inside a URL
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}{}", self.host, self.port, self.path)
        } else {
            format!("http://{}:{}{}", self.host, self.port, self.path)
        }
    }
}

/// `host:port`, as reported by the relay's health check
impl fmt::Display for RelayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
