//! `pas update` — patch an issue as a local (UI-side) edit.

use clap::Args;
use std::path::Path;

use pasithea_core::model::{Priority, Status};
use pasithea_core::store::IssueChanges;

use crate::board::Board;
use crate::cmd::parse_enum;
use crate::output::{render_error, render_success, CliError, OutputMode};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// ID of the issue to update.
    pub id: String,

    /// New title.
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description.
    #[arg(short, long)]
    pub description: Option<String>,

    /// New status: backlog, todo, in-progress, done.
    #[arg(short, long)]
    pub status: Option<String>,

    /// New priority: low, medium, high, critical.
    #[arg(short, long)]
    pub priority: Option<String>,

    /// New assignee.
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Replacement labels (repeat the flag).
    #[arg(short, long)]
    pub label: Vec<String>,
}

pub fn run(args: &UpdateArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let changes = IssueChanges {
        title: args.title.clone(),
        description: args.description.clone(),
        status: parse_enum::<Status>(args.status.as_deref(), output, &Status::NAMES)?,
        priority: parse_enum::<Priority>(args.priority.as_deref(), output, &Priority::NAMES)?,
        assignee: args.assignee.clone(),
        labels: if args.label.is_empty() {
            None
        } else {
            Some(args.label.clone())
        },
    };

    if changes.is_empty() {
        render_error(
            output,
            &CliError::with_details(
                "Nothing to update",
                "Pass at least one field flag (e.g. --status done)",
                "empty_patch",
            ),
        )?;
        anyhow::bail!("empty patch");
    }

    let mut board = Board::open(root)?;
    if board.local_update(&args.id, &changes) {
        render_success(output, &format!("Updated issue {}", args.id))
    } else {
        render_error(
            output,
            &CliError::with_details(
                format!("Issue {} not found.", args.id),
                "Run `pas list` to see current issue ids",
                "issue_not_found",
            ),
        )?;
        anyhow::bail!("issue {} not found", args.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let args = UpdateArgs {
            id: "ISS-1".to_string(),
            title: None,
            description: None,
            status: None,
            priority: None,
            assignee: None,
            label: vec![],
        };
        assert!(run(&args, OutputMode::Text, dir.path()).is_err());
    }

    #[test]
    fn missing_issue_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = UpdateArgs {
            id: "ISS-NOPE".to_string(),
            title: Some("new".to_string()),
            description: None,
            status: None,
            priority: None,
            assignee: None,
            label: vec![],
        };
        assert!(run(&args, OutputMode::Text, dir.path()).is_err());
    }
}
