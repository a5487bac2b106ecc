//! HTTP delivery of XML print jobs
//!
//! One request per job, no retries, no pooled connections. The caller owns
//! any retry policy.

use crate::error::{PrintError, PrintResult};
use crate::target::RelayTarget;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::error::Error as _;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Content type every forwarded job carries
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// Downstream reply, relayed verbatim
#[derive(Debug, Clone)]
pub struct PrinterReply {
    pub status: u16,
    pub body: Bytes,
}

/// Client for a single fixed downstream target
#[derive(Debug, Clone)]
pub struct PrinterClient {
    client: Client,
    target: RelayTarget,
    url: String,
    timeout: Duration,
}

impl PrinterClient {
    /// Create a client for `target`
    ///
    /// `timeout` bounds the whole exchange: connect, upload and reading the
    /// reply body.
    pub fn new(target: RelayTarget, timeout: Duration) -> PrintResult<Self> {
        if timeout.is_zero() {
            return Err(PrintError::InvalidConfig("Timeout must be > 0".into()));
        }

        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .map_err(|e| PrintError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: target.url(),
            target,
            timeout,
        })
    }

    pub fn target(&self) -> &RelayTarget {
        &self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Forward a job and wait for the downstream reply
    ///
    /// On timeout the in-flight request is dropped, which closes the
    /// downstream socket.
    #[instrument(skip(self, job), fields(target = %self.target, job_len = job.len()))]
    pub async fn print(&self, job: Bytes) -> PrintResult<PrinterReply> {
        match tokio::time::timeout(self.timeout, self.send(job)).await {
            Ok(Ok(reply)) => {
                info!(status = reply.status, "Downstream responded");
                Ok(reply)
            }
            Ok(Err(e)) => {
                error!(error = %e, "Downstream unreachable");
                Err(e)
            }
            Err(_) => {
                error!(timeout_ms = self.timeout.as_millis() as u64, "Downstream timeout");
                Err(PrintError::Timeout(self.timeout))
            }
        }
    }

    async fn send(&self, job: Bytes) -> PrintResult<PrinterReply> {
        // Content-Length is derived from the fully buffered body
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(job)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?;

        Ok(PrinterReply { status, body })
    }
}

fn classify(e: reqwest::Error) -> PrintError {
    // reqwest's own message ("error sending request for url ...") hides the
    // OS error, so walk the source chain.
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    PrintError::Unreachable(message)
}
