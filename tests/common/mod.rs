//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use domain_monitor::config::{CheckerConfig, DomainMonitorConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Start a backend that answers every request with `status` and an empty body.
pub async fn start_mock_backend(status: u16) -> SocketAddr {
    start_programmable_backend(move || async move { (status, String::new()) }).await
}

/// Start a programmable backend on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        if !read_request_head(&mut socket).await {
                            return;
                        }
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK".to_string(),
                            204 => "204 No Content".to_string(),
                            404 => "404 Not Found".to_string(),
                            500 => "500 Internal Server Error".to_string(),
                            503 => "503 Service Unavailable".to_string(),
                            other => format!("{} Mock", other),
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that sleeps `delay` before answering 200.
#[allow(dead_code)]
pub async fn start_slow_backend(delay: Duration) -> SocketAddr {
    start_programmable_backend(move || async move {
        tokio::time::sleep(delay).await;
        (200, "slow".into())
    })
    .await
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn read_request_head(socket: &mut TcpStream) -> bool {
    let mut buf = vec![0u8; 8192];
    let mut read = 0;
    while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
        if read == buf.len() {
            return false;
        }
        match socket.read(&mut buf[read..]).await {
            Ok(0) | Err(_) => return false,
            Ok(n) => read += n,
        }
    }
    true
}

/// Write a domains CSV with a header row.
pub fn write_domains_csv(dir: &Path, domains: &[String]) -> PathBuf {
    let path = dir.join("domains.csv");
    let mut content = String::from("domain,description\n");
    for domain in domains {
        content.push_str(&format!("{},test\n", domain));
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Checker config probing plain HTTP, bypassing any environment proxy.
pub fn checker_config(domains_path: PathBuf) -> CheckerConfig {
    CheckerConfig {
        domains_path,
        scheme: "http".into(),
        timeout_secs: 5,
        use_system_proxy: false,
        ..CheckerConfig::default()
    }
}

#[allow(dead_code)]
pub fn server_config(domains_path: PathBuf) -> DomainMonitorConfig {
    let mut config = DomainMonitorConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.checker = checker_config(domains_path);
    config.static_files.enabled = false;
    config
}
