//! `pas delete` — remove an issue as a local (UI-side) edit.

use clap::Args;
use std::path::Path;

use crate::board::Board;
use crate::output::{render_error, render_success, CliError, OutputMode};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// ID of the issue to delete.
    pub id: String,
}

pub fn run(args: &DeleteArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let mut board = Board::open(root)?;
    if board.local_delete(&args.id) {
        render_success(output, &format!("Deleted issue {}", args.id))
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
