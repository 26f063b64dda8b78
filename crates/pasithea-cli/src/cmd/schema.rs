//! `pas schema` — the declared tool contract, as shipped to the engine.

use clap::Args;
use serde_json::json;
use std::io::Write;

use pasithea_core::tools::{INSTRUCTIONS, TOOLS};

use crate::output::{render, OutputMode};

#[derive(Args, Debug)]
pub struct SchemaArgs {}

pub fn run(_args: &SchemaArgs, output: OutputMode) -> anyhow::Result<()> {
    let contract = json!({
        "instructions": INSTRUCTIONS,
        "tools": TOOLS,
    });

    render(output, &contract, |_, w| {
        for tool in TOOLS {
            writeln!(w, "{} — {}", tool.name, tool.description)?;
            for param in tool.parameters {
                let requirement = if param.required { "required" } else { "optional" };
                write!(w, "  {} ({requirement}) — {}", param.name, param.description)?;
                if let Some(allowed) = param.allowed {
                    write!(w, " [{}]", allowed.join(", "))?;
                }
                writeln!(w)?;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_renders_in_both_modes() {
        assert!(run(&SchemaArgs {}, OutputMode::Text).is_ok());
        assert!(run(&SchemaArgs {}, OutputMode::Json).is_ok());
    }
}
