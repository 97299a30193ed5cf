use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::mpsc::error::{SendTimeoutError, TrySendError};
use uuid::Uuid;

use crate::hub::message::Message;
use crate::utils::HubError;

/// Identifies one connection for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Fires once the hub has given up on a connection.
///
/// Held by the connection handler, which tears the socket down when it fires.
/// Carries no sender, so holding it does not keep the outbound buffer open.
#[derive(Debug, Clone)]
pub struct CloseSignal(Arc<Notify>);

impl CloseSignal {
    /// Resolves after `Connection::close` has been called on any clone,
    /// including calls made before this future was created.
    pub async fn wait(&self) {
        self.0.notified().await;
    }
}

/// Hub-side handle of a connected client.
///
/// Cloning is cheap; the registry keeps one clone and snapshots hand out more.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    sender: Sender<Message>,
    close: Arc<Notify>,
}

impl Connection {
    /// Wraps an existing outbound sender.
    pub fn new(sender: Sender<Message>) -> Self {
        Self {
            id: ConnectionId::new(),
            sender,
            close: Arc::new(Notify::new()),
        }
    }

    /// Creates a connection together with the receiving end of its outbound
    /// buffer, which the caller hands to the socket writer.
    pub fn channel(capacity: usize) -> (Self, Receiver<Message>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn close_signal(&self) -> CloseSignal {
        CloseSignal(self.close.clone())
    }

    /// Asks the handler to shut the socket down. Safe to call repeatedly.
    pub fn close(&self) {
        // notify_one stores a permit, so a handler not yet waiting still sees it
        self.close.notify_one();
    }

    /// Pushes `message` into the outbound buffer.
    ///
    /// Waits up to `timeout` for buffer space; a zero timeout fails
    /// immediately on a full buffer. Fails with `ConnectionClosed` when the
    /// writer has exited and with `SendTimeout` when the buffer stays full.
    pub async fn deliver(&self, message: Message, timeout: Duration) -> Result<(), HubError> {
        if timeout.is_zero() {
            return self.sender.try_send(message).map_err(|e| match e {
                TrySendError::Full(_) => HubError::SendTimeout(self.id),
                TrySendError::Closed(_) => HubError::ConnectionClosed(self.id),
            });
        }

        self.sender
            .send_timeout(message, timeout)
            .await
            .map_err(|e| match e {
                SendTimeoutError::Timeout(_) => HubError::SendTimeout(self.id),
                SendTimeoutError::Closed(_) => HubError::ConnectionClosed(self.id),
            })
    }
}
