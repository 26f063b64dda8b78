//! In-memory snapshot channels standing in for the external transport.
//!
//! Delivery is reliable and ordered within one session, matching the
//! transport assumptions of the contract. [`pump`] drains both directions
//! until quiescence; it terminates because observing a snapshot never
//! produces another outbound push.

use std::collections::VecDeque;

use crate::session::BoardSession;
use crate::sync::replica::BoardReplica;
use crate::sync::Snapshot;

/// A pair of ordered queues: canonical side → replica and back.
#[derive(Debug, Default)]
pub struct InMemoryBus {
    to_replica: VecDeque<Snapshot>,
    to_session: VecDeque<Snapshot>,
}

impl InMemoryBus {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            to_replica: VecDeque::new(),
            to_session: VecDeque::new(),
        }
    }

    pub fn push_to_replica(&mut self, snapshot: Snapshot) {
        self.to_replica.push_back(snapshot);
    }

    pub fn push_to_session(&mut self, snapshot: Snapshot) {
        self.to_session.push_back(snapshot);
    }

    pub fn next_for_replica(&mut self) -> Option<Snapshot> {
        self.to_replica.pop_front()
    }

    pub fn next_for_session(&mut self) -> Option<Snapshot> {
        self.to_session.pop_front()
    }

    /// True when nothing is in flight in either direction.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.to_replica.is_empty() && self.to_session.is_empty()
    }
}

/// Shuttle snapshots between the two sides until the bus is idle.
///
/// Replica pushes are adopted by the session and echoed back; everything
/// addressed to the replica is observed. Returns the number of snapshots
/// delivered.
pub fn pump(
    session: &mut BoardSession,
    replica: &mut BoardReplica,
    bus: &mut InMemoryBus,
) -> usize {
    let mut delivered = 0;
    loop {
        let mut progressed = false;
        if let Some(snapshot) = bus.next_for_session() {
            let echo = session.adopt(&snapshot);
            bus.push_to_replica(echo);
            delivered += 1;
            progressed = true;
        }
        if let Some(snapshot) = bus.next_for_replica() {
            replica.observe(&snapshot);
            delivered += 1;
            progressed = true;
        }
        if !progressed {
            break;
        }
    }
    delivered
}
