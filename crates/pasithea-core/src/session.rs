//! One canonical-side session: the store, the tool registry, and the
//! broadcaster, wired together. The store lives and dies with the session —
//! there is no process-wide board.

use tracing::debug;

use crate::store::IssueStore;
use crate::sync::{Snapshot, StateBroadcaster};
use crate::tools::{ToolCall, ToolRegistry, ToolReply};

#[derive(Debug)]
pub struct BoardSession {
    store: IssueStore,
    registry: ToolRegistry,
    broadcaster: StateBroadcaster,
}

impl BoardSession {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            store: IssueStore::new(),
            registry: ToolRegistry::new(),
            broadcaster: StateBroadcaster::new(project_name),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &IssueStore {
        &self.store
    }

    #[must_use]
    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool call. Mutating calls additionally yield an agent-origin
    /// snapshot for the replica side; reads and rejected calls yield none.
    pub fn dispatch(&mut self, call: &ToolCall) -> (ToolReply, Option<Snapshot>) {
        let outcome = self.registry.dispatch(&mut self.store, call);
        let snapshot = outcome
            .mutated
            .then(|| self.broadcaster.broadcast(self.store.list()));
        (outcome.reply, snapshot)
    }

    /// Adopt a replica push wholesale and return the echo to send back.
    pub fn adopt(&mut self, inbound: &Snapshot) -> Snapshot {
        debug!(
            version = inbound.version,
            count = inbound.board.issues.len(),
            "adopting replica snapshot"
        );
        self.store.replace_all(inbound.board.issues.clone());
        self.broadcaster.reflect(inbound, self.store.list())
    }

    /// A fresh snapshot of the canonical board, on demand.
    pub fn snapshot(&mut self) -> Snapshot {
        self.broadcaster.broadcast(self.store.list())
    }
}
