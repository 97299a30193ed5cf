//! Connection registry
//!
//! The set of connections currently eligible to receive broadcasts. Membership
//! says nothing about health; a dead connection stays registered until a read
//! or a delivery fails and someone removes it.
//!
//! Every operation holds the lock only for the map operation itself. Delivery
//! works on a `snapshot()` taken under the lock and used after releasing it,
//! so a slow client never blocks `add`/`remove` for anyone else.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::connection::{Connection, ConnectionId};

#[derive(Debug, Default)]
pub struct Registry {
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere cannot leave a HashMap half-mutated, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<ConnectionId, Connection>> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a connection. Adding an id that is already present is a no-op.
    pub fn add(&self, conn: Connection) {
        self.lock().entry(conn.id()).or_insert(conn);
    }

    /// Removes a connection and returns it, if it was present.
    ///
    /// Idempotent: both the read path and the delivery path may call this for
    /// the same connection.
    pub fn remove(&self, id: &ConnectionId) -> Option<Connection> {
        self.lock().remove(id)
    }

    /// Copies out the current members for one fan-out pass.
    pub fn snapshot(&self) -> Vec<Connection> {
        self.lock().values().cloned().collect()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
