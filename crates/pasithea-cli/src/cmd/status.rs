//! `pas status` — board summary plus environment checks.

use clap::Args;
use serde_json::json;
use std::io::Write;
use std::path::Path;

use pasithea_core::config;
use pasithea_core::model::Status;

use crate::board::Board;
use crate::output::{render, OutputMode};

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: &StatusArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let board = Board::open(root)?;
    let replica = config::replica_path(root);
    let credential_configured = config::resolve_model_token().is_some();

    let counts: Vec<(Status, usize)> = Status::ALL
        .iter()
        .map(|&status| {
            (
                status,
                board.issues().iter().filter(|i| i.status == status).count(),
            )
        })
        .collect();

    let columns: serde_json::Map<String, serde_json::Value> = counts
        .iter()
        .map(|(status, count)| (status.to_string(), json!(count)))
        .collect();

    let summary = json!({
        "projectName": board.project_name(),
        "total": board.issues().len(),
        "columns": columns,
        "replicaPath": replica.display().to_string(),
        "modelCredential": if credential_configured { "configured" } else { "missing" },
    });

    render(output, &summary, |_, w| {
        writeln!(w, "{:<18} {}", "project:", board.project_name())?;
        writeln!(w, "{:<18} {}", "issues:", board.issues().len())?;
        for (status, count) in &counts {
            writeln!(w, "  {:<16} {count}", format!("{}:", status.label()))?;
        }
        writeln!(w, "{:<18} {}", "replica:", replica.display())?;
        if credential_configured {
            writeln!(w, "{:<18} configured", "model credential:")?;
        } else {
            writeln!(
                w,
                "{:<18} MISSING (set PASITHEA_MODEL_TOKEN or MODEL_TOKEN)",
                "model credential:"
            )?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_runs_on_an_uninitialized_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&StatusArgs {}, OutputMode::Text, dir.path()).is_ok());
    }
}
