//! TCP connect probe.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::Instant;

use crate::domain::ProbeError;
use crate::ports::ConnectProbe;

/// Measures the time to complete a TCP handshake.
///
/// The connection is closed as soon as it is established.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProbe;

impl TcpConnectProbe {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConnectProbe for TcpConnectProbe {
    async fn connect(&self, target: SocketAddr, timeout: Duration) -> Result<Duration, ProbeError> {
        let started = Instant::now();
        match tokio::time::timeout(timeout, TcpStream::connect(target)).await {
            Ok(Ok(stream)) => {
                let elapsed = started.elapsed();
                drop(stream);
                Ok(elapsed)
            }
            Ok(Err(e)) => Err(ProbeError::Connect(e.to_string())),
            Err(_) => Err(ProbeError::Timeout),
        }
    }
}
