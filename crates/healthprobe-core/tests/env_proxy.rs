//! Proxy settings are taken from the process environment.
//!
//! Kept to a single test because it mutates the process environment.

use healthprobe::config::HttpClientConfig;
use healthprobe::transport::{HttpTransport, Transport};
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

#[tokio::test]
async fn test_requests_go_through_env_proxy() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let proxy = format!("http://{}", listener.local_addr().unwrap());

    // Answer one request and hand back its request line
    let proxy_task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut head = Vec::new();
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            head.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 202 Accepted\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
        let head = String::from_utf8_lossy(&head).into_owned();
        head.lines().next().unwrap_or_default().to_string()
    });

    for var in ["NO_PROXY", "no_proxy", "ALL_PROXY", "all_proxy"] {
        std::env::remove_var(var);
    }
    std::env::set_var("HTTP_PROXY", &proxy);
    std::env::set_var("http_proxy", &proxy);

    let transport = HttpTransport::new(&HttpClientConfig::default()).unwrap();
    let url = Url::parse("http://upstream.invalid/health").unwrap();

    let status = transport.get(&url).await.unwrap();
    let request_line = proxy_task.await.unwrap();

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(request_line, "GET http://upstream.invalid/health HTTP/1.1");
}
