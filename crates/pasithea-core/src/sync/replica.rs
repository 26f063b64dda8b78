//! The UI-side replica and its reconciliation against inbound snapshots.
//!
//! Local edits mutate the replica optimistically and produce an outbound
//! `ui`-origin snapshot whose version is remembered in a FIFO pending-echo
//! queue. When an inbound snapshot arrives, at most one pending marker is
//! consumed — matched, the snapshot is a pure echo and is dropped; unmatched,
//! the marker is lost and the inbound board overwrites the replica wholesale
//! (last full snapshot wins, no field-level merge). Two local edits racing a
//! single echo therefore remain a known limitation, inherited from the
//! contract, not fixed here.

use std::collections::VecDeque;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::ErrorCode;
use crate::model::{BoardState, Issue, IssueDraft};
use crate::persist;
use crate::store::{IdGenerator, IssueChanges};
use crate::sync::{Snapshot, SnapshotOrigin};

/// The reconciler's logical position within one sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    ApplyingLocal,
    ApplyingRemote,
}

/// What [`BoardReplica::observe`] did with an inbound snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveOutcome {
    /// The snapshot was a pure echo of this replica's own push; dropped.
    EchoConsumed,
    /// The snapshot carried a remote change; the replica was overwritten.
    Applied,
}

/// UI-held copy of the board, persisted locally across restarts.
#[derive(Debug)]
pub struct BoardReplica {
    issues: Vec<Issue>,
    project_name: String,
    ids: IdGenerator,
    next_version: u64,
    pending_echoes: VecDeque<u64>,
    phase: SyncPhase,
    persist_to: Option<PathBuf>,
}

impl BoardReplica {
    /// An empty, in-memory replica (no persistence).
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            issues: Vec::new(),
            project_name: project_name.into(),
            ids: IdGenerator::new(),
            next_version: 0,
            pending_echoes: VecDeque::new(),
            phase: SyncPhase::Idle,
            persist_to: None,
        }
    }

    /// Load the persisted replica blob from `path` and persist every
    /// subsequent change back to it. Missing or malformed data starts the
    /// replica empty; nothing is written until the first change.
    pub fn hydrate(project_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let issues = persist::load(&path);
        debug!(count = issues.len(), path = %path.display(), "hydrated replica");
        Self {
            issues,
            persist_to: Some(path),
            ..Self::new(project_name)
        }
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    #[must_use]
    pub const fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Number of outbound pushes still awaiting their echo.
    #[must_use]
    pub fn pending_echoes(&self) -> usize {
        self.pending_echoes.len()
    }

    /// Push the current replica contents to the canonical side without a
    /// preceding edit — the startup hydration handshake.
    pub fn push_state(&mut self) -> Snapshot {
        self.outbound()
    }

    /// Create an issue locally. The UI layer deduplicates labels on insert;
    /// the store layer never does.
    pub fn local_create(&mut self, mut draft: IssueDraft) -> (Issue, Snapshot) {
        if let Some(labels) = draft.labels.as_mut() {
            dedup_preserving_order(labels);
        }
        let issue = draft.into_issue(self.ids.next_id());
        self.issues.push(issue.clone());
        debug!(id = %issue.id, "local create");
        (issue, self.outbound())
    }

    /// Patch an issue locally. Returns `None` (and pushes nothing) when `id`
    /// is absent from the replica.
    pub fn local_update(&mut self, id: &str, changes: &IssueChanges) -> Option<Snapshot> {
        let issue = self.issues.iter_mut().find(|issue| issue.id == id)?;
        changes.apply_to(issue);
        debug!(id, "local update");
        Some(self.outbound())
    }

    /// Delete an issue locally. Returns `None` when `id` is absent.
    pub fn local_delete(&mut self, id: &str) -> Option<Snapshot> {
        let before = self.issues.len();
        self.issues.retain(|issue| issue.id != id);
        if self.issues.len() == before {
            return None;
        }
        debug!(id, "local delete");
        Some(self.outbound())
    }

    /// React to an inbound snapshot from the canonical side.
    ///
    /// Consumes at most one pending-echo marker per call, win or lose. A
    /// matched `ui`-origin snapshot is a pure echo and leaves the replica
    /// untouched; anything else overwrites the replica wholesale.
    pub fn observe(&mut self, snapshot: &Snapshot) -> ObserveOutcome {
        self.phase = SyncPhase::ApplyingRemote;
        let pending = self.pending_echoes.pop_front();
        let outcome = if snapshot.origin == SnapshotOrigin::Ui
            && pending == Some(snapshot.version)
        {
            debug!(version = snapshot.version, "echo consumed");
            ObserveOutcome::EchoConsumed
        } else {
            if pending.is_some() {
                debug!(
                    version = snapshot.version,
                    "pending echo marker lost to an interleaved remote change"
                );
            }
            self.issues.clone_from(&snapshot.board.issues);
            self.project_name.clone_from(&snapshot.board.project_name);
            self.save();
            debug!(
                version = snapshot.version,
                count = self.issues.len(),
                "remote snapshot applied"
            );
            ObserveOutcome::Applied
        };
        self.phase = SyncPhase::Idle;
        outcome
    }

    fn outbound(&mut self) -> Snapshot {
        self.phase = SyncPhase::ApplyingLocal;
        self.next_version += 1;
        let version = self.next_version;
        self.pending_echoes.push_back(version);
        self.save();
        self.phase = SyncPhase::Idle;
        Snapshot {
            origin: SnapshotOrigin::Ui,
            version,
            board: BoardState {
                issues: self.issues.clone(),
                project_name: self.project_name.clone(),
            },
        }
    }

    fn save(&self) {
        let Some(path) = &self.persist_to else {
            return;
        };
        if let Err(error) = persist::save(path, &self.issues) {
            // A failed write must not take the UI down; the next change retries.
            warn!(
                code = %ErrorCode::ReplicaWriteFailed.code(),
                %error,
                path = %path.display(),
                "failed to persist replica"
            );
        }
    }
}

/// Drop repeated labels, keeping first occurrences in order.
fn dedup_preserving_order(labels: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    labels.retain(|label| seen.insert(label.clone()));
}
