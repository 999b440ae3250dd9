//! HTTP download probe.
//!
//! Pins the benchmark host name to the candidate address, so the request
//! carries the real `Host` header while the bytes come from the candidate.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::trace;

use crate::domain::ProbeError;
use crate::ports::ThroughputProbe;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Download probe configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HttpThroughputConfig {
    /// Benchmark host name (sent as `Host`, resolved to the candidate)
    pub host: String,
    /// Plain HTTP port
    pub port: u16,
    /// Bytes requested from the download endpoint
    pub bytes: u64,
    /// Connect plus response-header timeout
    pub connect_timeout: Duration,
    /// Read budget, measured from the start of the request
    pub read_budget: Duration,
    /// `User-Agent` header
    pub user_agent: String,
}

impl Default for HttpThroughputConfig {
    fn default() -> Self {
        Self {
            host: "speed.cloudflare.com".to_string(),
            port: 80,
            bytes: 20 * 1024 * 1024,
            connect_timeout: Duration::from_secs(4),
            read_budget: Duration::from_secs(3),
            user_agent: concat!("edge-scout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpThroughputConfig {
    /// Download URL; the host part is resolved per probe.
    pub fn url(&self) -> String {
        format!(
            "http://{}:{}/__down?bytes={}",
            self.host, self.port, self.bytes
        )
    }
}

/// Bulk download probe over plain HTTP.
///
/// Reads until the body ends or the read budget runs out, then reports
/// bytes received over elapsed time.
#[derive(Debug, Clone)]
pub struct HttpThroughputProbe {
    config: HttpThroughputConfig,
}

impl HttpThroughputProbe {
    pub fn new(config: HttpThroughputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HttpThroughputConfig {
        &self.config
    }

    fn client_for(&self, address: IpAddr) -> Result<reqwest::Client, ProbeError> {
        // Port 0: the port from the URL is used.
        reqwest::Client::builder()
            .resolve(&self.config.host, SocketAddr::new(address, 0))
            .connect_timeout(self.config.connect_timeout)
            .user_agent(self.config.user_agent.as_str())
            .no_proxy()
            .build()
            .map_err(|e| ProbeError::Connect(e.to_string()))
    }
}

impl Default for HttpThroughputProbe {
    fn default() -> Self {
        Self::new(HttpThroughputConfig::default())
    }
}

#[async_trait]
impl ThroughputProbe for HttpThroughputProbe {
    async fn measure(&self, address: IpAddr) -> Result<f64, ProbeError> {
        let client = self.client_for(address)?;
        let started = Instant::now();
        let deadline = started + self.config.read_budget;

        let mut response =
            tokio::time::timeout(self.config.connect_timeout, client.get(self.config.url()).send())
                .await
                .map_err(|_| ProbeError::Timeout)?
                .map_err(|e| ProbeError::Connect(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProbeError::Transfer(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let mut received: u64 = 0;
        loop {
            match tokio::time::timeout_at(deadline, response.chunk()).await {
                Ok(Ok(Some(chunk))) => received += chunk.len() as u64,
                Ok(Ok(None)) | Err(_) => break,
                Ok(Err(e)) if received == 0 => return Err(ProbeError::Transfer(e.to_string())),
                Ok(Err(e)) => {
                    trace!("[http] {} cut off after {} bytes: {}", address, received, e);
                    break;
                }
            }
        }

        let secs = started.elapsed().as_secs_f64();
        if secs <= 0.0 {
            return Ok(0.0);
        }
        Ok(received as f64 / BYTES_PER_MB / secs)
    }
}
