//! `pas move` — move an issue between columns via the tool contract.
//!
//! Unlike the local-edit commands, this goes through the canonical session's
//! `move_issue` tool, so the reply is the agent-facing confirmation string —
//! including "not found", which is a reply, not a failure.

use clap::Args;
use serde_json::json;
use std::io::Write;
use std::path::Path;

use pasithea_core::tools::ToolCall;

use crate::board::Board;
use crate::output::{render, OutputMode};

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// ID of the issue to move.
    pub id: String,

    /// Target status column: backlog, todo, in-progress, done.
    pub status: String,
}

pub fn run(args: &MoveArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let mut board = Board::open(root)?;
    let reply = board.call(&ToolCall::new(
        "move_issue",
        json!({ "id": args.id, "status": args.status }),
    ));

    let text = reply.summary();
    let payload = json!({ "result": &text });
    render(output, &payload, |_, w| writeln!(w, "{text}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_reports_not_found_as_a_reply() {
        let dir = tempfile::tempdir().unwrap();
        let args = MoveArgs {
            id: "ISS-NOPE".to_string(),
            status: "done".to_string(),
        };
        // The tool surface never faults for domain errors.
        assert!(run(&args, OutputMode::Text, dir.path()).is_ok());
    }

    #[test]
    fn bad_status_comes_back_as_a_rejection_reply() {
        let dir = tempfile::tempdir().unwrap();
        let args = MoveArgs {
            id: "ISS-1".to_string(),
            status: "launched".to_string(),
        };
        assert!(run(&args, OutputMode::Text, dir.path()).is_ok());
    }
}
