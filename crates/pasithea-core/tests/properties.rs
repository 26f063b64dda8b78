//! Property tests over the tool contract and the persistence round trip.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

use pasithea_core::model::{Issue, IssueDraft, Priority, Status};
use pasithea_core::store::{IssueChanges, IssueStore};
use pasithea_core::sync::BoardReplica;
use pasithea_core::tools::{ToolCall, ToolRegistry, ToolReply};
use serde_json::json;

fn title_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}( [a-z]{1,12}){0,2}"
}

fn label_strategy() -> impl Strategy<Value = Vec<String>> {
    vec("[a-z]{1,8}", 0..4)
}

fn status_strategy() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Backlog),
        Just(Status::Todo),
        Just(Status::InProgress),
        Just(Status::Done),
    ]
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Critical),
    ]
}

fn draft_strategy() -> impl Strategy<Value = IssueDraft> {
    (
        title_strategy(),
        option::of("[a-z ]{0,20}"),
        option::of(status_strategy()),
        option::of(priority_strategy()),
        option::of("[a-z]{1,8}"),
        option::of(label_strategy()),
    )
        .prop_map(
            |(title, description, status, priority, assignee, labels)| IssueDraft {
                title,
                description,
                status,
                priority,
                assignee,
                labels,
            },
        )
}

fn changes_strategy() -> impl Strategy<Value = IssueChanges> {
    (
        option::of(title_strategy()),
        option::of("[a-z ]{0,20}"),
        option::of(status_strategy()),
        option::of(priority_strategy()),
        option::of("[a-z]{1,8}"),
        option::of(label_strategy()),
    )
        .prop_map(
            |(title, description, status, priority, assignee, labels)| IssueChanges {
                title,
                description,
                status,
                priority,
                assignee,
                labels,
            },
        )
}

fn create_via_tool(store: &mut IssueStore, registry: &ToolRegistry, title: &str) -> Issue {
    let outcome = registry.dispatch(
        store,
        &ToolCall::new("create_issue", json!({ "title": title })),
    );
    match outcome.reply {
        ToolReply::Issue(issue) => *issue,
        other => panic!("expected created issue, got {other:?}"),
    }
}

proptest! {
    /// Every created issue gets a unique id, enum defaults when omitted, and
    /// equal creation/update stamps — even for bursts created back-to-back
    /// within the same millisecond.
    #[test]
    fn creations_default_and_get_distinct_ids(titles in vec(title_strategy(), 2..20)) {
        let registry = ToolRegistry::new();
        let mut store = IssueStore::new();
        let mut seen = std::collections::HashSet::new();

        for title in &titles {
            let issue = create_via_tool(&mut store, &registry, title);
            prop_assert!(seen.insert(issue.id.clone()), "duplicate id {}", issue.id);
            prop_assert_eq!(issue.status, Status::Todo);
            prop_assert_eq!(issue.priority, Priority::Medium);
            prop_assert_eq!(&issue.created_at, &issue.updated_at);
        }
        prop_assert_eq!(store.len(), titles.len());
    }

    /// Updates change exactly the supplied fields; everything omitted is
    /// preserved byte-for-byte, and `updated_at` is refreshed.
    #[test]
    fn updates_touch_only_named_fields(draft in draft_strategy(), changes in changes_strategy()) {
        let mut store = IssueStore::new();
        let id = store.next_id();
        store.insert(draft.into_issue(id.clone()));
        let before = store.find_by_id(&id).unwrap().clone();

        prop_assert!(store.update(&id, &changes));
        let after = store.find_by_id(&id).unwrap();

        prop_assert_eq!(&after.id, &before.id);
        prop_assert_eq!(&after.created_at, &before.created_at);
        prop_assert!(after.updated_at >= before.updated_at);

        let expect_title = changes.title.as_ref().unwrap_or(&before.title);
        prop_assert_eq!(&after.title, expect_title);
        let expect_description = changes.description.as_ref().unwrap_or(&before.description);
        prop_assert_eq!(&after.description, expect_description);
        prop_assert_eq!(after.status, changes.status.unwrap_or(before.status));
        prop_assert_eq!(after.priority, changes.priority.unwrap_or(before.priority));
        let expect_assignee = changes
            .assignee
            .clone()
            .map_or(before.assignee.clone(), Some);
        prop_assert_eq!(&after.assignee, &expect_assignee);
        let expect_labels = changes.labels.as_ref().unwrap_or(&before.labels);
        prop_assert_eq!(&after.labels, expect_labels);
    }

    /// Deleting is idempotent: the first call removes exactly one record, the
    /// second removes none.
    #[test]
    fn delete_removes_once(drafts in vec(draft_strategy(), 1..6)) {
        let mut store = IssueStore::new();
        for draft in drafts {
            let id = store.next_id();
            store.insert(draft.into_issue(id));
        }
        let len = store.len();
        let id = store.list()[0].id.clone();

        prop_assert_eq!(store.remove(&id), 1);
        prop_assert_eq!(store.remove(&id), 0);
        prop_assert_eq!(store.len(), len - 1);
    }

    /// Serializing a replica and rehydrating it reproduces an equal issue
    /// sequence, order and field values included.
    #[test]
    fn replica_round_trips_through_disk(drafts in vec(draft_strategy(), 0..8)) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replica.json");

        let written = {
            let mut replica = BoardReplica::hydrate("Pasithea", &path);
            for draft in drafts {
                replica.local_create(draft);
            }
            replica.issues().to_vec()
        };

        let reloaded = BoardReplica::hydrate("Pasithea", &path);
        prop_assert_eq!(reloaded.issues(), written.as_slice());
    }
}
