//! WebSocket transport
//!
//! Accepts TCP connections, upgrades them and bridges each one to the hub:
//! - the handshake only admits the configured path and only when one of the
//!   hub's `max_connections` slots could be reserved
//! - every accepted connection is registered before its reader starts
//! - a writer task drains the connection's outbound buffer onto the socket
//! - a reader task decodes frames and submits them to the inbound queue
//!
//! Whichever task ends first takes the other down, as does the hub closing
//! the connection after a failed delivery; then the connection is
//! deregistered. Nothing that happens to one connection, including a failed
//! handshake, affects the accept loop or any other connection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::Receiver;
use tokio_tungstenite::{WebSocketStream, accept_hdr_async};
use tracing::{debug, info, warn};
use tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tungstenite::http::StatusCode;
use tungstenite::protocol::Message as WsMessage;

use crate::config::Settings;
use crate::connection::{Connection, ConnectionId};
use crate::hub::{Hub, Message};
use crate::transport::codec;
use crate::utils::HubError;

type WsSink = SplitSink<WebSocketStream<TcpStream>, WsMessage>;
type WsSource = SplitStream<WebSocketStream<TcpStream>>;

/// Binds `addr` and serves WebSocket clients until the task is dropped.
///
/// Only a bind failure is returned; per-connection failures are logged.
pub async fn start_websocket_server(
    addr: &str,
    hub: Hub,
    settings: Settings,
) -> Result<(), HubError> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        "WebSocket server listening on ws://{}{}",
        listener.local_addr()?,
        settings.server.path
    );
    serve(listener, hub, settings).await;
    Ok(())
}

/// Accept loop over an already bound listener.
pub async fn serve(listener: TcpListener, hub: Hub, settings: Settings) {
    let settings = Arc::new(settings);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                // usually fd exhaustion; back off instead of spinning
                warn!("accept failed: {e}");
                tokio::time::sleep(Duration::from_millis(50)).await;
                continue;
            }
        };

        let hub = hub.clone();
        let settings = settings.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer, hub, &settings).await {
                warn!("connection from {peer} failed: {e}");
            }
        });
    }
}

/// Decides whether an upgrade request may proceed. `has_slot` says whether
/// a connection slot was reserved for this request.
pub fn admit(request_path: &str, settings: &Settings, has_slot: bool) -> Result<(), StatusCode> {
    if request_path != settings.server.path {
        return Err(StatusCode::NOT_FOUND);
    }
    if !has_slot {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(())
}

fn reject(status: StatusCode) -> ErrorResponse {
    let reason = status.canonical_reason().map(str::to_string);
    let mut response = ErrorResponse::new(reason);
    *response.status_mut() = status;
    response
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    hub: Hub,
    settings: &Settings,
) -> Result<(), HubError> {
    // Reserved before the handshake so concurrent upgrades cannot overshoot
    // max_connections; released when this function returns.
    let slot = hub.try_reserve();
    let has_slot = slot.is_some();
    let check = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        match admit(req.uri().path(), settings, has_slot) {
            Ok(()) => Ok(resp),
            Err(status) => {
                debug!("rejecting upgrade from {peer} for {}: {status}", req.uri());
                Err(reject(status))
            }
        }
    };
    let ws_stream = accept_hdr_async(stream, check).await?;

    let (ws_sender, ws_receiver) = ws_stream.split();
    let (conn, outbound) = Connection::channel(settings.hub.outbound_buffer);
    let id = conn.id();
    let closed = conn.close_signal();
    hub.register(conn);
    info!("{id} connected from {peer}");

    let mut send_task = tokio::spawn(write_loop(id, ws_sender, outbound));
    let mut recv_task = tokio::spawn(read_loop(id, ws_receiver, hub.clone()));

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
        _ = closed.wait() => {
            // the writer may be parked on a peer that stopped reading
            debug!("hub closed {id}");
            send_task.abort();
            recv_task.abort();
        }
    }

    hub.deregister(&id);
    drop(slot);
    info!("{id} disconnected");
    Ok(())
}

async fn write_loop(id: ConnectionId, mut ws_sender: WsSink, mut outbound: Receiver<Message>) {
    while let Some(msg) = outbound.recv().await {
        let sent = match codec::encode(&msg) {
            Ok(frame) => ws_sender.send(frame).await.map_err(HubError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = sent {
            debug!("write to {id} failed: {e}");
            return;
        }
    }

    // The hub dropped this connection.
    let _ = ws_sender.send(WsMessage::Close(None)).await;
}

async fn read_loop(id: ConnectionId, mut ws_receiver: WsSource, hub: Hub) {
    while let Some(frame) = ws_receiver.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                debug!("read from {id} failed: {e}");
                return;
            }
        };

        match codec::decode(frame) {
            Ok(Some(msg)) => {
                if let Err(e) = hub.submit(id, msg) {
                    debug!("dropping message from {id}: {e}");
                    return;
                }
            }
            Ok(None) => {}
            Err(HubError::Closed) => return,
            Err(e) => {
                warn!("{id} sent an invalid message: {e}");
                return;
            }
        }
    }
}
