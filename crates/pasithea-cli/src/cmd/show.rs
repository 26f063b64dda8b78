//! `pas show` — full details for one issue.

use clap::Args;
use std::io::Write;
use std::path::Path;

use crate::board::Board;
use crate::output::{render, render_error, CliError, OutputMode};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// ID of the issue to show.
    pub id: String,
}

pub fn run(args: &ShowArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let board = Board::open(root)?;
    let Some(issue) = board.find(&args.id) else {
        render_error(
            output,
            &CliError::with_details(
                format!("Issue {} not found.", args.id),
                "Run `pas list` to see current issue ids",
                "issue_not_found",
            ),
        )?;
        anyhow::bail!("issue {} not found", args.id);
    };

    render(output, issue, |issue, w| {
        writeln!(w, "{:<12} {}", "id:", issue.id)?;
        writeln!(w, "{:<12} {}", "title:", issue.title)?;
        writeln!(w, "{:<12} {}", "status:", issue.status)?;
        writeln!(w, "{:<12} {}", "priority:", issue.priority)?;
        if let Some(assignee) = &issue.assignee {
            writeln!(w, "{:<12} {}", "assignee:", assignee)?;
        }
        if !issue.labels.is_empty() {
            writeln!(w, "{:<12} {}", "labels:", issue.labels.join(", "))?;
        }
        writeln!(w, "{:<12} {}", "created:", issue.created_at)?;
        writeln!(w, "{:<12} {}", "updated:", issue.updated_at)?;
        if !issue.description.is_empty() {
            writeln!(w, "\n{}", issue.description)?;
        }
        Ok(())
    })
}
