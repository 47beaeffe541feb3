//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use devgate::config::GatewayConfig;
use devgate::{GatewayServer, Shutdown};

/// Bind the gateway on an ephemeral port and run it in the background.
///
/// Returns the bound address and the shutdown handle.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Arc<Shutdown>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Arc::new(Shutdown::new());
    let rx = shutdown.subscribe();
    let server = GatewayServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Reserve a local port that nothing listens on.
///
/// Binds an ephemeral port and drops the listener; the port stays free for
/// the duration of a short test.
pub async fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Start a programmable mock dev server on an ephemeral port.
///
/// The closure decides status and body per request; responses carry an
/// `x-upstream: yes` marker header so passthrough can be asserted.
#[allow(dead_code)]
pub async fn start_mock_dev_server<F, Fut>(f: F) -> SocketAddr
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
                        // Drain the request head before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            201 => "201 Created",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nx-upstream: yes\r\nConnection: close\r\n\r\n{}",
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

/// Start a WebSocket upstream that echoes text frames with an `upstream:`
/// prefix, standing in for the dev server's HMR socket.
#[allow(dead_code)]
pub async fn start_ws_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    tokio::spawn(async move {
                        let ws = match tokio_tungstenite::accept_async(stream).await {
                            Ok(ws) => ws,
                            Err(_) => return,
                        };
                        let (mut tx, mut rx) = ws.split();
                        while let Some(Ok(msg)) = rx.next().await {
                            if let tokio_tungstenite::tungstenite::Message::Text(text) = msg {
                                let reply = format!("upstream:{text}");
                                if tx
                                    .send(tokio_tungstenite::tungstenite::Message::Text(
                                        reply.into(),
                                    ))
                                    .await
                                    .is_err()
                                {
                                    return;
                                }
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
