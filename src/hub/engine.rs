use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info};

use crate::config::HubSettings;
use crate::connection::{Connection, ConnectionId};
use crate::hub::message::Message;
use crate::hub::registry::Registry;
use crate::utils::HubError;

/// One item of the inbound queue: a message and the connection it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub from: ConnectionId,
    pub message: Message,
}

/// Handle shared by every connection handler.
///
/// Handlers use it to join and leave the registry and to submit messages to
/// the inbound queue. It never delivers anything itself; only the
/// `BroadcastLoop` does.
#[derive(Debug, Clone)]
pub struct Hub {
    registry: Arc<Registry>,
    inbound: UnboundedSender<Inbound>,
    slots: Arc<Semaphore>,
}

impl Hub {
    /// Creates the registry, the inbound queue and the loop that drains it.
    ///
    /// The returned `BroadcastLoop` must be driven (usually spawned) for any
    /// message to be delivered.
    pub fn new(settings: &HubSettings) -> (Hub, BroadcastLoop) {
        let registry = Arc::new(Registry::new());
        let (tx, rx) = mpsc::unbounded_channel();

        let hub = Hub {
            registry: registry.clone(),
            inbound: tx,
            slots: Arc::new(Semaphore::new(
                settings.max_connections.min(Semaphore::MAX_PERMITS),
            )),
        };
        let broadcast = BroadcastLoop {
            registry,
            inbound: rx,
            send_timeout: Duration::from_millis(settings.send_timeout_ms),
            echo_to_sender: settings.echo_to_sender,
        };
        (hub, broadcast)
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Claims one of the `max_connections` slots, or `None` when all are
    /// taken. The slot is released when the permit is dropped, so a handler
    /// holds it for as long as its connection lives.
    pub fn try_reserve(&self) -> Option<OwnedSemaphorePermit> {
        self.slots.clone().try_acquire_owned().ok()
    }

    pub fn register(&self, conn: Connection) {
        let id = conn.id();
        self.registry.add(conn);
        debug!("{id} registered ({} connected)", self.registry.len());
    }

    pub fn deregister(&self, id: &ConnectionId) {
        if self.registry.remove(id).is_some() {
            debug!("{id} deregistered ({} connected)", self.registry.len());
        }
    }

    /// Queues `message` for broadcast. Fails only once the loop has stopped.
    pub fn submit(&self, from: ConnectionId, message: Message) -> Result<(), HubError> {
        self.inbound
            .send(Inbound { from, message })
            .map_err(|_| HubError::LoopStopped)
    }
}

/// The single consumer of the inbound queue.
///
/// Messages are fanned out strictly one at a time: every delivery attempt for
/// message N finishes before message N+1 is taken off the queue, so all
/// connections that stay registered see the same order.
#[derive(Debug)]
pub struct BroadcastLoop {
    registry: Arc<Registry>,
    inbound: UnboundedReceiver<Inbound>,
    send_timeout: Duration,
    echo_to_sender: bool,
}

impl BroadcastLoop {
    /// Runs until every `Hub` handle has been dropped and the queue is empty.
    pub async fn run(mut self) {
        info!("broadcast loop started");
        while let Some(inbound) = self.inbound.recv().await {
            self.fan_out(&inbound).await;
        }
        info!("inbound queue closed, broadcast loop stopping");
    }

    /// Delivers one message to every registered connection and returns how
    /// many deliveries succeeded.
    ///
    /// A connection whose delivery fails is closed and removed from the
    /// registry; the remaining connections are still served.
    pub async fn fan_out(&self, inbound: &Inbound) -> usize {
        if self.registry.is_empty() {
            debug!("no connections to deliver to");
            return 0;
        }

        let mut delivered = 0;

        for conn in self.registry.snapshot() {
            if !self.echo_to_sender && conn.id() == inbound.from {
                continue;
            }

            match conn.deliver(inbound.message.clone(), self.send_timeout).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    debug!("dropping {}: {e}", conn.id());
                    conn.close();
                    self.registry.remove(&conn.id());
                }
            }
        }

        delivered
    }
}
