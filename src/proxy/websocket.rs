//! WebSocket handling on the upgrade path.
//!
//! # Responsibilities
//! - Complete the upgrade handshake with the client
//! - Proxy mode: dial the dev server's HMR socket and relay frames both ways
//! - Echo mode: run a local welcome/echo protocol, no upstream involved
//!
//! # Design Decisions
//! - Frame-level forwarding, no message buffering
//! - Close frames end the relay; ping/pong pass through transparently
//! - Upstream dial failure closes the client socket and is logged; the
//!   process is never affected

use axum::extract::ws::{Message as ClientMsg, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message as UpstreamMsg;

/// Relay a client WebSocket to the dev server socket at `upstream_url`.
pub async fn proxy(client: WebSocket, upstream_url: String) {
    let (upstream, _) = match tokio_tungstenite::connect_async(&upstream_url).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(url = %upstream_url, error = %e, "WebSocket upstream connect failed");
            return;
        }
    };

    tracing::debug!(url = %upstream_url, "WebSocket relay established");

    let (mut client_tx, mut client_rx) = client.split();
    let (mut upstream_tx, mut upstream_rx) = upstream.split();

    let client_to_upstream = async move {
        while let Some(msg) = client_rx.next().await {
            let msg = match msg {
                Ok(m) => m,
                Err(_) => return,
            };
            let forwarded = match msg {
                ClientMsg::Text(t) => UpstreamMsg::Text(t.as_str().into()),
                ClientMsg::Binary(b) => UpstreamMsg::Binary(b),
                ClientMsg::Ping(p) => UpstreamMsg::Ping(p),
                ClientMsg::Pong(p) => UpstreamMsg::Pong(p),
                ClientMsg::Close(_) => return,
            };
            if upstream_tx.send(forwarded).await.is_err() {
                return;
            }
        }
    };

    let upstream_to_client = async move {
        while let Some(msg) = upstream_rx.next().await {
            let msg = match msg {
                Ok(m) => m,
                Err(_) => return,
            };
            let forwarded = match msg {
                UpstreamMsg::Text(t) => ClientMsg::Text(t.as_str().into()),
                UpstreamMsg::Binary(b) => ClientMsg::Binary(b),
                UpstreamMsg::Ping(p) => ClientMsg::Ping(p),
                UpstreamMsg::Pong(p) => ClientMsg::Pong(p),
                UpstreamMsg::Close(_) => return,
                UpstreamMsg::Frame(_) => continue,
            };
            if client_tx.send(forwarded).await.is_err() {
                return;
            }
        }
    };

    // When either direction ends, drop the other.
    tokio::select! {
        _ = client_to_upstream => {},
        _ = upstream_to_client => {},
    }

    tracing::debug!(url = %upstream_url, "WebSocket relay closed");
}

/// Local welcome/echo protocol.
///
/// Sends a JSON welcome on connect, then wraps every text frame in an echo
/// envelope. Used by deployments that have no HMR socket behind them.
pub async fn echo(mut client: WebSocket) {
    let welcome = serde_json::json!({
        "type": "connected",
        "message": "devgate websocket ready",
    });
    if client
        .send(ClientMsg::Text(welcome.to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    while let Some(msg) = client.recv().await {
        let msg = match msg {
            Ok(m) => m,
            Err(_) => return,
        };
        match msg {
            ClientMsg::Text(text) => {
                let reply = serde_json::json!({
                    "type": "echo",
                    "data": text.as_str(),
                });
                if client
                    .send(ClientMsg::Text(reply.to_string().into()))
                    .await
                    .is_err()
                {
                    return;
                }
            }
            ClientMsg::Ping(payload) => {
                if client.send(ClientMsg::Pong(payload)).await.is_err() {
                    return;
                }
            }
            ClientMsg::Close(_) => return,
            _ => {}
        }
    }
}
