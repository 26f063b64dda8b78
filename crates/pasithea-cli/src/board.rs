//! Per-invocation board harness.
//!
//! Each CLI run is one session: the persisted replica is hydrated, pushed to
//! a fresh canonical session (the startup handshake), and then commands go
//! through one of the two sides — local edits mutate the replica and push,
//! tool calls dispatch against the session and broadcast back. Every cycle is
//! pumped to quiescence before the process exits, so the replica blob always
//! holds the merged board.

use std::path::Path;

use anyhow::Result;

use pasithea_core::config;
use pasithea_core::model::{Issue, IssueDraft};
use pasithea_core::session::BoardSession;
use pasithea_core::store::IssueChanges;
use pasithea_core::sync::bus::{pump, InMemoryBus};
use pasithea_core::sync::{BoardReplica, Snapshot};
use pasithea_core::tools::{ToolCall, ToolReply};

pub struct Board {
    session: BoardSession,
    replica: BoardReplica,
    bus: InMemoryBus,
}

impl Board {
    /// Hydrate the replica from `.pasithea/replica.json` under `root` and run
    /// the startup handshake so the canonical session sees the same board.
    pub fn open(root: &Path) -> Result<Self> {
        let config = config::load_project_config(root)?;
        let project_name = config.board.project_name;
        let mut replica =
            BoardReplica::hydrate(project_name.clone(), config::replica_path(root));
        let mut session = BoardSession::new(project_name);
        let mut bus = InMemoryBus::new();

        let seed = replica.push_state();
        bus.push_to_session(seed);
        pump(&mut session, &mut replica, &mut bus);
        tracing::debug!(issues = replica.issues().len(), "board opened");

        Ok(Self {
            session,
            replica,
            bus,
        })
    }

    pub fn project_name(&self) -> &str {
        self.replica.project_name()
    }

    pub fn issues(&self) -> &[Issue] {
        self.replica.issues()
    }

    pub fn find(&self, id: &str) -> Option<&Issue> {
        self.replica.find(id)
    }

    /// Agent path: dispatch one tool call against the canonical session and
    /// let the replica observe whatever snapshot it broadcasts.
    pub fn call(&mut self, call: &ToolCall) -> ToolReply {
        let (reply, snapshot) = self.session.dispatch(call);
        if let Some(snapshot) = snapshot {
            self.bus.push_to_replica(snapshot);
            pump(&mut self.session, &mut self.replica, &mut self.bus);
        }
        reply
    }

    /// UI path: create locally, then push the edit through its sync cycle.
    pub fn local_create(&mut self, draft: IssueDraft) -> Issue {
        let (issue, snapshot) = self.replica.local_create(draft);
        self.complete_local_cycle(snapshot);
        issue
    }

    /// UI path: patch locally. Returns `false` when `id` is absent.
    pub fn local_update(&mut self, id: &str, changes: &IssueChanges) -> bool {
        match self.replica.local_update(id, changes) {
            Some(snapshot) => {
                self.complete_local_cycle(snapshot);
                true
            }
            None => false,
        }
    }

    /// UI path: delete locally. Returns `false` when `id` is absent.
    pub fn local_delete(&mut self, id: &str) -> bool {
        match self.replica.local_delete(id) {
            Some(snapshot) => {
                self.complete_local_cycle(snapshot);
                true
            }
            None => false,
        }
    }

    fn complete_local_cycle(&mut self, snapshot: Snapshot) {
        self.bus.push_to_session(snapshot);
        pump(&mut self.session, &mut self.replica, &mut self.bus);
    }
}
