//! `pas init` — initialize a board in the current directory.

use clap::Args;
use std::path::Path;

use pasithea_core::config::{self, ProjectConfig};

use crate::output::{render_error, render_success, CliError, OutputMode};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name shown on the board.
    #[arg(long, default_value = "Pasithea")]
    pub name: String,
}

pub fn run(args: &InitArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let path = config::config_path(root);
    if path.exists() {
        render_error(
            output,
            &CliError::with_details(
                format!("Board already initialized at {}", path.display()),
                "Edit .pasithea/config.toml to change the project name",
                "already_initialized",
            ),
        )?;
        anyhow::bail!("already initialized");
    }

    let mut config = ProjectConfig::default();
    config.board.project_name.clone_from(&args.name);
    config::save_project_config(root, &config)?;

    render_success(
        output,
        &format!("Initialized pasithea board '{}'", args.name),
    )
}
