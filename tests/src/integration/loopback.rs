//! # Loopback Sockets
//!
//! The real TCP and HTTP adapters driven by the engine against listeners on
//! 127.0.0.1.

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use scout_core::adapters::mocks::InMemoryModelStore;
    use scout_core::{
        BanditConfig, HttpThroughputConfig, HttpThroughputProbe, ProbeConfig, ProbeEngine,
        SharedModel, TcpConnectProbe,
    };

    const BODY_LEN: usize = 512 * 1024;

    /// Minimal HTTP server: answers every request with `BODY_LEN` zero bytes.
    async fn spawn_download_server() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }
                    let header = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {BODY_LEN}\r\nConnection: close\r\n\r\n"
                    );
                    let _ = socket.write_all(header.as_bytes()).await;
                    let _ = socket.write_all(&vec![0u8; BODY_LEN]).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        port
    }

    #[tokio::test]
    async fn test_engine_over_real_sockets() {
        let probe_target = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let probe_port = probe_target.local_addr().unwrap().port();
        let http_port = spawn_download_server().await;

        let reachable = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let refused = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 2));

        let config = ProbeConfig {
            port: probe_port,
            connect_timeout: Duration::from_secs(1),
            ..Default::default()
        };
        let throughput = HttpThroughputProbe::new(HttpThroughputConfig {
            host: "speed.test".to_string(),
            port: http_port,
            bytes: BODY_LEN as u64,
            ..Default::default()
        });
        let engine = ProbeEngine::new(config, Arc::new(TcpConnectProbe::new()), Arc::new(throughput));
        let store = Arc::new(InMemoryModelStore::new());
        let model = SharedModel::load(store.clone(), BanditConfig::default());

        let report = engine.run(vec![reachable, refused], &model).await.unwrap();

        assert_eq!(report.survivors.len(), 1);
        assert_eq!(report.survivors[0].address, reachable);
        assert_eq!(report.selected.len(), 1);
        assert!(report.selected[0].throughput_mbps > 0.1);
        assert_eq!(store.save_count(), 1);
        drop(probe_target);
    }
}
