//! `pas list` — list issues, optionally filtered by status column.

use clap::Args;
use std::io::{self, Write};
use std::path::Path;

use pasithea_core::model::{Issue, Status};

use crate::board::Board;
use crate::cmd::parse_enum;
use crate::output::OutputMode;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status column: backlog, todo, in-progress, done.
    #[arg(short, long)]
    pub status: Option<String>,
}

pub fn run(args: &ListArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let filter = parse_enum::<Status>(args.status.as_deref(), output, &Status::NAMES)?;
    let board = Board::open(root)?;
    let issues: Vec<&Issue> = board
        .issues()
        .iter()
        .filter(|issue| filter.is_none_or(|status| issue.status == status))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match output {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, &issues)?;
            writeln!(out)?;
        }
        OutputMode::Text => {
            if !issues.is_empty() {
                writeln!(out, "ID  STATUS  PRIORITY  TITLE")?;
            }
            for issue in &issues {
                writeln!(
                    out,
                    "{}  {}  {}  {}",
                    issue.id, issue.status, issue.priority, issue.title
                )?;
            }
        }
        OutputMode::Pretty => {
            writeln!(
                out,
                "{} — {} issue(s)",
                board.project_name(),
                issues.len()
            )?;
            let columns = match filter {
                Some(status) => vec![status],
                None => Status::ALL.to_vec(),
            };
            for status in columns {
                let column: Vec<&&Issue> =
                    issues.iter().filter(|i| i.status == status).collect();
                writeln!(out, "\n{} ({})", status.label(), column.len())?;
                for issue in column {
                    write_pretty_row(&mut out, issue)?;
                }
            }
        }
    }
    Ok(())
}

fn write_pretty_row(out: &mut dyn Write, issue: &Issue) -> io::Result<()> {
    write!(out, "  {}  [{}] {}", issue.id, issue.priority, issue.title)?;
    if let Some(assignee) = &issue.assignee {
        write!(out, " @{assignee}")?;
    }
    if !issue.labels.is_empty() {
        write!(out, " ({})", issue.labels.join(", "))?;
    }
    writeln!(out)
}
