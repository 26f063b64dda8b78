//! `pas create` — create an issue as a local (UI-side) edit.

use clap::Args;
use std::io::Write;
use std::path::Path;

use pasithea_core::model::{IssueDraft, Priority, Status};

use crate::board::Board;
use crate::cmd::parse_enum;
use crate::output::{render, render_error, CliError, OutputMode};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Title of the new issue.
    #[arg(short, long)]
    pub title: String,

    /// Description text.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Status column: backlog, todo, in-progress, done.
    #[arg(short, long)]
    pub status: Option<String>,

    /// Priority: low, medium, high, critical.
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Assignee name.
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Labels to attach (repeat the flag).
    #[arg(short, long)]
    pub label: Vec<String>,
}

pub fn run(args: &CreateArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    if args.title.trim().is_empty() {
        render_error(
            output,
            &CliError::with_details(
                "Title must not be empty",
                "Pass a non-empty --title",
                "empty_title",
            ),
        )?;
        anyhow::bail!("empty title");
    }

    let status = parse_enum::<Status>(args.status.as_deref(), output, &Status::NAMES)?;
    let priority = parse_enum::<Priority>(args.priority.as_deref(), output, &Priority::NAMES)?;

    let mut board = Board::open(root)?;
    let issue = board.local_create(IssueDraft {
        title: args.title.clone(),
        description: args.description.clone(),
        status,
        priority,
        assignee: args.assignee.clone(),
        labels: if args.label.is_empty() {
            None
        } else {
            Some(args.label.clone())
        },
    });

    render(output, &issue, |issue, w| {
        writeln!(w, "✓ Created issue {}: {}", issue.id, issue.title)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_args_defaults() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CreateArgs,
        }
        let w = Wrapper::parse_from(["test", "--title", "Hello"]);
        assert_eq!(w.args.title, "Hello");
        assert!(w.args.status.is_none());
        assert!(w.args.label.is_empty());
    }

    #[test]
    fn bad_status_fails_before_touching_the_board() {
        let dir = tempfile::tempdir().unwrap();
        let args = CreateArgs {
            title: "t".to_string(),
            description: None,
            status: Some("active".to_string()),
            priority: None,
            assignee: None,
            label: vec![],
        };
        assert!(run(&args, OutputMode::Text, dir.path()).is_err());
        assert!(!dir.path().join(".pasithea/replica.json").exists());
    }
}
