//! The canonical ordered issue collection and its single-issue mutations.
//!
//! The store is explicitly owned: one instance per session, passed `&mut` into
//! every tool handler. No operation fails for "not found" — absence is a value
//! (`Option`/`bool`/count) the caller turns into a textual result.

use chrono::Utc;

use crate::model::{now_rfc3339, Issue, Priority, Status};

/// Generates `ISS-`-prefixed ids: wall-clock milliseconds in uppercase hex
/// plus a per-store monotonic counter in base36. The counter is what makes
/// rapid same-millisecond creations produce distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    seq: u64,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { seq: 0 }
    }

    /// Next unique id for this generator's lifetime.
    pub fn next_id(&mut self) -> String {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let seq = self.seq;
        self.seq += 1;
        format!("ISS-{millis:X}-{}", base36(seq))
    }
}

fn base36(mut n: u64) -> String {
    let mut out = String::new();
    loop {
        let digit = char::from_digit(u32::try_from(n % 36).unwrap_or_default(), 36)
            .unwrap_or('0');
        out.insert(0, digit);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out
}

/// A patch over one issue's mutable fields. `None` means "do not change" —
/// there is no way to clear a field through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub labels: Option<Vec<String>>,
}

impl IssueChanges {
    /// True when the patch names no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.labels.is_none()
    }

    /// Apply the patch to `issue`, refreshing `updated_at`. Fields absent from
    /// the patch retain their prior values exactly.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(title) = &self.title {
            issue.title = title.clone();
        }
        if let Some(description) = &self.description {
            issue.description = description.clone();
        }
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(assignee) = &self.assignee {
            issue.assignee = Some(assignee.clone());
        }
        if let Some(labels) = &self.labels {
            issue.labels = labels.clone();
        }
        issue.updated_at = now_rfc3339();
    }
}

/// The canonical ordered collection. Owns id generation so uniqueness holds
/// for the store's whole lifetime.
#[derive(Debug, Default)]
pub struct IssueStore {
    issues: Vec<Issue>,
    ids: IdGenerator,
}

impl IssueStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issues: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    /// All issues in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Draw the next unique id from the store's generator.
    pub fn next_id(&mut self) -> String {
        self.ids.next_id()
    }

    /// Append a fully-defaulted record. The caller is responsible for having
    /// drawn `issue.id` from this store's generator (or another unique source).
    pub fn insert(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Patch one issue. Returns `false` (and changes nothing) when `id` is
    /// absent; otherwise applies the patch and refreshes `updated_at`.
    pub fn update(&mut self, id: &str, changes: &IssueChanges) -> bool {
        match self.issues.iter_mut().find(|issue| issue.id == id) {
            Some(issue) => {
                changes.apply_to(issue);
                true
            }
            None => false,
        }
    }

    /// Remove at most one record; returns how many were removed (0 or 1).
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.issues.len();
        self.issues.retain(|issue| issue.id != id);
        before - self.issues.len()
    }

    /// Wholesale adoption of a pushed replica snapshot: the inbound list
    /// replaces the collection, order included.
    pub fn replace_all(&mut self, issues: Vec<Issue>) {
        self.issues = issues;
    }
}

#[cfg(test)]
mod tests {
    use super::{base36, IdGenerator, IssueChanges, IssueStore};
    use crate::model::{IssueDraft, Priority, Status};
    use std::collections::HashSet;
    use std::time::Duration;

    fn draft(title: &str) -> IssueDraft {
        IssueDraft {
            title: title.to_string(),
            ..IssueDraft::default()
        }
    }

    fn seeded_store(titles: &[&str]) -> IssueStore {
        let mut store = IssueStore::new();
        for title in titles {
            let id = store.next_id();
            store.insert(draft(title).into_issue(id));
        }
        store
    }

    #[test]
    fn base36_encodes_expected_digits() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(36 * 36 + 1), "101");
    }

    #[test]
    fn rapid_ids_are_distinct_within_one_millisecond() {
        let mut ids = IdGenerator::new();
        let burst: Vec<String> = (0..500).map(|_| ids.next_id()).collect();
        let unique: HashSet<&String> = burst.iter().collect();
        assert_eq!(unique.len(), burst.len());
        assert!(burst.iter().all(|id| id.starts_with("ISS-")));
    }

    #[test]
    fn store_preserves_insertion_order() {
        let store = seeded_store(&["first", "second", "third"]);
        let titles: Vec<&str> = store.list().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let store = seeded_store(&["only"]);
        let id = store.list()[0].id.clone();
        assert!(store.find_by_id(&id).is_some());
        assert!(store.find_by_id("ISS-NOPE").is_none());
    }

    #[test]
    fn update_patches_only_named_fields() {
        let mut store = seeded_store(&["keep me"]);
        let id = store.list()[0].id.clone();
        let before = store.list()[0].clone();

        std::thread::sleep(Duration::from_millis(2));
        let changed = store.update(
            &id,
            &IssueChanges {
                status: Some(Status::Done),
                ..IssueChanges::default()
            },
        );
        assert!(changed);

        let after = store.find_by_id(&id).unwrap();
        assert_eq!(after.status, Status::Done);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.assignee, before.assignee);
        assert_eq!(after.labels, before.labels);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[test]
    fn update_missing_id_changes_nothing() {
        let mut store = seeded_store(&["a"]);
        let snapshot: Vec<_> = store.list().to_vec();
        let changed = store.update(
            "ISS-NOPE",
            &IssueChanges {
                priority: Some(Priority::Critical),
                ..IssueChanges::default()
            },
        );
        assert!(!changed);
        assert_eq!(store.list(), snapshot.as_slice());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = seeded_store(&["a", "b"]);
        let id = store.list()[0].id.clone();
        assert_eq!(store.remove(&id), 1);
        assert_eq!(store.remove(&id), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_all_adopts_inbound_order() {
        let mut store = seeded_store(&["x", "y"]);
        let mut incoming: Vec<_> = store.list().to_vec();
        incoming.reverse();
        store.replace_all(incoming.clone());
        assert_eq!(store.list(), incoming.as_slice());
    }

    #[test]
    fn empty_patch_still_refreshes_updated_at() {
        let mut store = seeded_store(&["a"]);
        let id = store.list()[0].id.clone();
        let before = store.list()[0].updated_at.clone();
        std::thread::sleep(Duration::from_millis(2));
        assert!(store.update(&id, &IssueChanges::default()));
        assert!(store.find_by_id(&id).unwrap().updated_at > before);
    }

    #[test]
    fn store_does_not_deduplicate_labels() {
        let mut store = IssueStore::new();
        let id = store.next_id();
        let mut issue = draft("labels").into_issue(id.clone());
        issue.labels = vec!["dup".to_string(), "dup".to_string()];
        store.insert(issue);
        assert_eq!(store.find_by_id(&id).unwrap().labels.len(), 2);
    }
}
