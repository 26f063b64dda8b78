//! `pas call` — invoke any contract tool the way the agent does.

use clap::Args;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

use pasithea_core::tools::{ToolCall, ToolReply};

use crate::board::Board;
use crate::output::{render, render_error, CliError, OutputMode};

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name (e.g. get_issues, create_issue).
    pub tool: String,

    /// Tool arguments as a JSON object.
    #[arg(long, default_value = "{}")]
    pub args: String,
}

pub fn run(args: &CallArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let value: Value = match serde_json::from_str(&args.args) {
        Ok(value) => value,
        Err(error) => {
            render_error(
                output,
                &CliError::with_details(
                    format!("--args is not valid JSON: {error}"),
                    "Pass a JSON object, e.g. --args '{\"title\": \"Fix bug\"}'",
                    "invalid_json",
                ),
            )?;
            anyhow::bail!("invalid --args JSON");
        }
    };

    let mut board = Board::open(root)?;
    let reply = board.call(&ToolCall::new(&args.tool, value));

    render(output, &reply, |reply, w| match reply {
        ToolReply::Issues(issues) => {
            for issue in issues {
                writeln!(
                    w,
                    "{}  {}  {}  {}",
                    issue.id, issue.status, issue.priority, issue.title
                )?;
            }
            Ok(())
        }
        ToolReply::Issue(issue) => {
            writeln!(w, "✓ Created issue {}: {}", issue.id, issue.title)
        }
        ToolReply::Text(text) => writeln!(w, "{text}"),
    })
}
