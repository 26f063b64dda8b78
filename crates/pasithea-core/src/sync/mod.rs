//! Snapshot-based state propagation between the canonical side and the
//! UI-held replica.
//!
//! Every propagated state is a full, self-contained copy of the board (no
//! deltas) tagged with the side that originated the underlying change and a
//! monotonically increasing version. The tag/version pair is what lets the
//! replica tell a pure echo of its own push apart from an independent remote
//! change — there is no shared mutable flag anywhere in the loop.
//!
//! The transport itself is external; [`bus::InMemoryBus`] stands in for it
//! in tests and single-process harnesses.

pub mod bus;
pub mod replica;

pub use replica::{BoardReplica, ObserveOutcome, SyncPhase};

use serde::{Deserialize, Serialize};

use crate::model::{BoardState, Issue};

/// Which side originated the change a snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOrigin {
    /// Canonical-side mutation (a tool call).
    Agent,
    /// Replica-side local edit.
    Ui,
}

/// A full copy of board state at a point in time, tagged for echo detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub origin: SnapshotOrigin,
    pub version: u64,
    pub board: BoardState,
}

/// Produces canonical-side snapshots: on demand, and after every mutation.
#[derive(Debug)]
pub struct StateBroadcaster {
    project_name: String,
    next_version: u64,
}

impl StateBroadcaster {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            next_version: 0,
        }
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// A fresh agent-origin snapshot of `issues` with the next version.
    pub fn broadcast(&mut self, issues: &[Issue]) -> Snapshot {
        self.next_version += 1;
        Snapshot {
            origin: SnapshotOrigin::Agent,
            version: self.next_version,
            board: BoardState {
                issues: issues.to_vec(),
                project_name: self.project_name.clone(),
            },
        }
    }

    /// Reflect an adopted inbound snapshot back to its sender, preserving its
    /// origin tag and version: the echo is the same logical state, not a new
    /// change, so it must not consume a fresh version.
    pub fn reflect(&self, inbound: &Snapshot, issues: &[Issue]) -> Snapshot {
        Snapshot {
            origin: inbound.origin,
            version: inbound.version,
            board: BoardState {
                issues: issues.to_vec(),
                project_name: self.project_name.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SnapshotOrigin, StateBroadcaster};
    use crate::model::IssueDraft;

    #[test]
    fn broadcast_versions_increase_monotonically() {
        let mut broadcaster = StateBroadcaster::new("Pasithea");
        let first = broadcaster.broadcast(&[]);
        let second = broadcaster.broadcast(&[]);
        assert_eq!(first.origin, SnapshotOrigin::Agent);
        assert!(second.version > first.version);
    }

    #[test]
    fn broadcast_copies_issues_and_project_name() {
        let mut broadcaster = StateBroadcaster::new("Pasithea");
        let issue = IssueDraft {
            title: "snap".to_string(),
            ..IssueDraft::default()
        }
        .into_issue("ISS-1".to_string());
        let snapshot = broadcaster.broadcast(std::slice::from_ref(&issue));
        assert_eq!(snapshot.board.project_name, "Pasithea");
        assert_eq!(snapshot.board.issues, [issue]);
    }

    #[test]
    fn reflect_preserves_origin_and_version() {
        let mut broadcaster = StateBroadcaster::new("Pasithea");
        let mut inbound = broadcaster.broadcast(&[]);
        inbound.origin = SnapshotOrigin::Ui;
        inbound.version = 41;

        let echo = broadcaster.reflect(&inbound, &[]);
        assert_eq!(echo.origin, SnapshotOrigin::Ui);
        assert_eq!(echo.version, 41);

        // A later broadcast still advances the canonical counter independently.
        let next = broadcaster.broadcast(&[]);
        assert_eq!(next.origin, SnapshotOrigin::Agent);
        assert_eq!(next.version, 2);
    }

    #[test]
    fn snapshot_wire_shape() {
        let mut broadcaster = StateBroadcaster::new("Pasithea");
        let snapshot = broadcaster.broadcast(&[]);
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["origin"], "agent");
        assert_eq!(value["version"], 1);
        assert_eq!(value["board"]["projectName"], "Pasithea");
        assert!(value["board"]["issues"].as_array().unwrap().is_empty());
    }
}
