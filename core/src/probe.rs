//! Health probes.
//!
//! A probe answers one question per attempt: is the dependency ready?
//! Everything that can go wrong on the way (connection refused, timeout,
//! DNS failure, non-2xx status) is one kind of answer: not ready yet.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use gatr_common::target::ProbeTarget;

/// Why a single probe attempt came back negative.
///
/// The gate treats every variant identically; the split exists only so the
/// retry notice can say what actually happened.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unhealthy status {0}")]
    Status(u16),
}

/// One readiness check against a dependency.
///
/// The gate loop depends on this seam rather than on a concrete client, so
/// it can be exercised against scripted probes in tests.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn check(&self) -> Result<(), ProbeError>;

    /// Human-readable endpoint description for progress messages.
    fn endpoint(&self) -> String;
}

/// HTTP GET probe; only the status code is inspected, the body is ignored.
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    /// Builds a probe with a per-attempt request timeout.
    ///
    /// The timeout covers the whole attempt (connect, send, first byte of
    /// the response), so a hung dependency cannot stall the poll loop.
    pub fn new(target: &ProbeTarget, timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: target.url(),
        })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self) -> Result<(), ProbeError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }

    fn endpoint(&self) -> String {
        self.url.clone()
    }
}
