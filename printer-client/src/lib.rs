//! # printer-client
//!
//! Downstream side of the print relay: delivers an XML print job to a
//! printer's web API (Star WebPRNT) or to another relay hop.
//!
//! ## Scope
//!
//! This crate handles WHERE and HOW a job is delivered:
//! - Target addressing (`host:port` + path)
//! - One HTTP POST per job, no connection reuse
//! - A fixed timeout covering connect, send and reply
//!
//! Inbound HTTP handling (routes, CORS, logging) stays in `printer-relay`.
//!
//! ## Example
//!
//! ```ignore
//! use printer_client::{PrinterClient, RelayTarget};
//! use std::time::Duration;
//!
//! let target = RelayTarget::new("192.168.1.100", 80, "/StarWebPRNT/SendMessage")?;
//! let client = PrinterClient::new(target, Duration::from_secs(5))?;
//!
//! let reply = client.print(xml.into()).await?;
//! println!("printer answered {}", reply.status);
//! ```

mod client;
mod error;
mod target;

// Re-exports
pub use client::{PrinterClient, PrinterReply, XML_CONTENT_TYPE};
pub use error::{PrintError, PrintResult};
pub use target::RelayTarget;
